use clap::{Args, Parser, Subcommand};
use sf_app::{AppResult, Evaluation, EvaluationOptions, history_service, scenario_service};
use sf_model::DEFAULT_PROJECTION_STEPS;
use sf_results::{RunRecord, RunStore};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "SignalFlow CLI - Intersection signal timing analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default five-lane scenario
    Init {
        /// Output path (.yaml, .yml or .json)
        scenario_path: PathBuf,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Evaluate current timing, reallocate green and compare
    Evaluate {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Projection steps
        #[arg(long, default_value_t = DEFAULT_PROJECTION_STEPS)]
        steps: usize,
        /// Do not write the result to run history
        #[arg(long)]
        no_save: bool,
        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        history: HistoryDirArg,
    },
    /// Print optimized green times only
    Optimize {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Print the advisory optimal cycle length
    Cycle {
        /// Path to the scenario file
        scenario_path: PathBuf,
    },
    /// Export the queue projection as CSV
    Project {
        /// Path to the scenario file
        scenario_path: PathBuf,
        /// Projection steps
        #[arg(long, default_value_t = DEFAULT_PROJECTION_STEPS)]
        steps: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Browse and replay saved runs
    #[command(subcommand)]
    History(HistoryCommands),
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List saved runs, newest first
    List {
        /// Path to the scenario file the history belongs to
        scenario_path: PathBuf,
        #[command(flatten)]
        history: HistoryDirArg,
    },
    /// Show one saved run
    Show {
        scenario_path: PathBuf,
        run_id: String,
        #[command(flatten)]
        history: HistoryDirArg,
    },
    /// Re-run the engine on a saved lane snapshot
    Replay {
        scenario_path: PathBuf,
        run_id: String,
        /// Projection steps
        #[arg(long, default_value_t = DEFAULT_PROJECTION_STEPS)]
        steps: usize,
        #[command(flatten)]
        history: HistoryDirArg,
    },
    /// Delete a saved run
    Delete {
        scenario_path: PathBuf,
        run_id: String,
        #[command(flatten)]
        history: HistoryDirArg,
    },
}

#[derive(Args)]
struct HistoryDirArg {
    /// History directory (defaults to .signalflow/runs beside the scenario)
    #[arg(long)]
    history_dir: Option<PathBuf>,
}

impl HistoryDirArg {
    fn store(&self, scenario_path: &Path) -> AppResult<RunStore> {
        let store = match &self.history_dir {
            Some(dir) => RunStore::new(dir.clone())?,
            None => RunStore::for_scenario(scenario_path)?,
        };
        Ok(store)
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { scenario_path } => cmd_init(&scenario_path),
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Evaluate {
            scenario_path,
            steps,
            no_save,
            json,
            history,
        } => {
            let options = EvaluationOptions {
                projection_steps: steps,
                save_history: !no_save,
            };
            cmd_evaluate(&scenario_path, &options, json, &history)
        }
        Commands::Optimize { scenario_path } => cmd_optimize(&scenario_path),
        Commands::Cycle { scenario_path } => cmd_cycle(&scenario_path),
        Commands::Project {
            scenario_path,
            steps,
            output,
        } => cmd_project(&scenario_path, steps, output.as_deref()),
        Commands::History(history_cmd) => match history_cmd {
            HistoryCommands::List {
                scenario_path,
                history,
            } => cmd_history_list(&history.store(&scenario_path)?),
            HistoryCommands::Show {
                scenario_path,
                run_id,
                history,
            } => cmd_history_show(&history.store(&scenario_path)?, &run_id),
            HistoryCommands::Replay {
                scenario_path,
                run_id,
                steps,
                history,
            } => cmd_history_replay(&history.store(&scenario_path)?, &run_id, steps),
            HistoryCommands::Delete {
                scenario_path,
                run_id,
                history,
            } => {
                history_service::delete_run(&history.store(&scenario_path)?, &run_id)?;
                println!("✓ Deleted run {}", run_id);
                Ok(())
            }
        },
    }
}

fn cmd_init(scenario_path: &Path) -> AppResult<()> {
    let scenario = scenario_service::write_default_scenario(scenario_path)?;
    println!(
        "✓ Wrote '{}' ({} lanes, {} s cycle) to {}",
        scenario.name,
        scenario.lanes.len(),
        scenario.cycle_time_s,
        scenario_path.display()
    );
    Ok(())
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = scenario_service::load_scenario(scenario_path)?;
    scenario_service::scenario_lanes(&scenario)?;
    println!("✓ Scenario is valid");
    Ok(())
}

fn cmd_evaluate(
    scenario_path: &Path,
    options: &EvaluationOptions,
    json: bool,
    history: &HistoryDirArg,
) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let store = history.store(scenario_path)?;
    let (evaluation, record) = history_service::evaluate_and_record(&store, &scenario, options)?;

    if json {
        let out = serde_json::to_string_pretty(&evaluation)
            .map_err(|e| sf_app::AppError::InvalidInput(e.to_string()))?;
        println!("{}", out);
    } else {
        println!("Scenario: {}", scenario.name);
        print_evaluation(&evaluation);
    }

    if let Some(record) = record
        && !json
    {
        println!("\n✓ Saved run {}", record.run_id);
    }
    Ok(())
}

fn cmd_optimize(scenario_path: &Path) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let lanes = scenario_service::scenario_lanes(&scenario)?;
    let optimized = sf_model::optimize(&lanes, scenario.cycle_time_s)?;

    println!(
        "Usable green: {:.0} s of {:.0} s cycle",
        sf_model::usable_green_s(lanes.len(), scenario.cycle_time_s),
        scenario.cycle_time_s
    );
    for opt in &optimized {
        println!(
            "  {:>4}  {:<24} {:>6.1} s -> {:>4} s  ({:+.1})",
            opt.id(),
            opt.lane.name,
            opt.lane.green_time_s,
            opt.optimized_green_time_s,
            opt.green_delta_s()
        );
    }
    Ok(())
}

fn cmd_cycle(scenario_path: &Path) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let lanes = scenario_service::scenario_lanes(&scenario)?;
    let estimate = sf_model::estimate_optimal_cycle_detail(&lanes)?;

    println!("Optimal cycle: {} s", estimate.cycle_s);
    println!("  Flow ratio sum (Y): {:.3}", estimate.flow_ratio_sum);
    println!("  Lost time:          {:.1} s", estimate.total_lost_time_s);
    if estimate.unclamped_cycle_s != f64::from(estimate.cycle_s) {
        println!("  Unclamped:          {:.0} s", estimate.unclamped_cycle_s);
    }
    println!("  Current cycle:      {:.0} s", scenario.cycle_time_s);
    Ok(())
}

fn cmd_project(scenario_path: &Path, steps: usize, output: Option<&Path>) -> AppResult<()> {
    let scenario = scenario_service::load_scenario(scenario_path)?;
    let lanes = scenario_service::scenario_lanes(&scenario)?;
    let projection = sf_model::project(&lanes, scenario.cycle_time_s, steps)?;
    let csv = sf_app::projection_to_csv(&projection);

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} steps to {}", projection.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_history_list(store: &RunStore) -> AppResult<()> {
    let runs = history_service::list_history(store)?;

    if runs.is_empty() {
        println!("No saved runs in {}", store.root_dir().display());
    } else {
        println!("Saved runs:");
        for record in runs {
            println!(
                "  {}  {}  {} ({} lanes, {} s)  wait {:+.1}%",
                &record.run_id[..12.min(record.run_id.len())],
                record.timestamp,
                record.scenario_name,
                record.lane_count,
                record.cycle_time_s,
                record.wait_improvement_pct
            );
        }
    }
    Ok(())
}

fn cmd_history_show(store: &RunStore, run_id: &str) -> AppResult<()> {
    let record = history_service::load_record(store, run_id)?;
    print_record(&record);
    Ok(())
}

fn cmd_history_replay(store: &RunStore, run_id: &str, steps: usize) -> AppResult<()> {
    let options = EvaluationOptions {
        projection_steps: steps,
        save_history: false,
    };
    let (record, evaluation) = history_service::replay_run(store, run_id, &options)?;
    println!(
        "Replaying run {} ({}, recorded {})",
        record.run_id, record.scenario_name, record.timestamp
    );
    print_evaluation(&evaluation);
    Ok(())
}

fn print_evaluation(evaluation: &Evaluation) {
    println!(
        "\n  {:>4}  {:<24} {:>12} {:>14} {:>10} {:>10}",
        "id", "lane", "green (s)", "delay (s)", "queue", "congest %"
    );
    for row in evaluation.comparison_rows() {
        println!(
            "  {:>4}  {:<24} {:>5.0} -> {:<4} {:>6.1} -> {:<5.1} {:>3} -> {:<3} {:>3} -> {:<3}",
            row.lane_id,
            row.name,
            row.green_before_s,
            row.green_after_s,
            row.delay_before_s,
            row.delay_after_s,
            row.queue_before,
            row.queue_after,
            row.congestion_before_pct,
            row.congestion_after_pct
        );
    }

    let s = &evaluation.summary;
    println!("\nSummary:");
    println!(
        "  Average wait:   {:.1} s -> {:.1} s ({:+.1}%)",
        s.before_wait_s, s.after_wait_s, s.wait_improvement_pct
    );
    println!(
        "  Congestion:     {:.1}% -> {:.1}% ({:+.1}%)",
        s.before_congestion_pct, s.after_congestion_pct, s.congestion_reduction_pct
    );
    println!(
        "  Throughput:     {:.1} -> {:.1} veh/cycle ({:+.1}%)",
        s.before_throughput, s.after_throughput, s.throughput_gain_pct
    );
    println!(
        "  Optimal cycle:  {} s (current {:.0} s)",
        evaluation.optimal_cycle.cycle_s, evaluation.cycle_time_s
    );
}

fn print_record(record: &RunRecord) {
    println!("Run {}", record.run_id);
    println!("  Recorded:     {}", record.timestamp);
    println!("  Scenario:     {}", record.scenario_name);
    println!("  Engine:       {}", record.engine_version);
    println!("  Lanes:        {}", record.lane_count);
    println!("  Cycle:        {} s", record.cycle_time_s);
    println!(
        "  Wait:         {:.1} s -> {:.1} s ({:+.1}%)",
        record.before_wait_s, record.after_wait_s, record.wait_improvement_pct
    );
    println!("  Congestion:   {:+.1}%", record.congestion_reduction_pct);
    println!("  Throughput:   {:+.1}%", record.throughput_gain_pct);
    println!("\n  Green allocation:");
    for (lane, opt) in record.lane_snapshot.iter().zip(&record.optimized_snapshot) {
        println!(
            "    {:>4}  {:<24} {:>6.1} s -> {:>4} s",
            lane.id, lane.name, opt.green_time_s, opt.optimized_green_time_s
        );
    }
}
