//! Run history: saving evaluations, listing them and replaying a stored
//! lane snapshot through the engine.

use sf_project::Scenario;
use sf_results::{OptimizedLaneSnapshot, RunRecord, RunStore, compute_run_id, timestamp_now};
use tracing::{debug, info};

use crate::ENGINE_VERSION;
use crate::error::AppResult;
use crate::evaluation::{Evaluation, EvaluationOptions, evaluate, evaluate_scenario};

/// Build the history record for an evaluation.
pub fn record_for(evaluation: &Evaluation, scenario_name: &str) -> RunRecord {
    let summary = &evaluation.summary;
    RunRecord {
        run_id: compute_run_id(&evaluation.lanes, evaluation.cycle_time_s, ENGINE_VERSION),
        timestamp: timestamp_now(),
        scenario_name: scenario_name.to_string(),
        engine_version: ENGINE_VERSION.to_string(),
        lane_count: evaluation.lanes.len(),
        cycle_time_s: evaluation.cycle_time_s,
        before_wait_s: summary.before_wait_s,
        after_wait_s: summary.after_wait_s,
        wait_improvement_pct: summary.wait_improvement_pct,
        congestion_reduction_pct: summary.congestion_reduction_pct,
        throughput_gain_pct: summary.throughput_gain_pct,
        lane_snapshot: evaluation.lanes.clone(),
        optimized_snapshot: evaluation
            .optimized
            .iter()
            .map(|o| OptimizedLaneSnapshot {
                lane_id: o.id(),
                green_time_s: o.lane.green_time_s,
                optimized_green_time_s: o.optimized_green_time_s,
            })
            .collect(),
    }
}

pub fn save_evaluation(
    store: &RunStore,
    evaluation: &Evaluation,
    scenario_name: &str,
) -> AppResult<RunRecord> {
    let record = record_for(evaluation, scenario_name);
    store.save_run(&record)?;
    info!(run_id = %record.run_id, dir = %store.root_dir().display(), "run saved");
    Ok(record)
}

/// Evaluate a scenario and, when `options.save_history` is set, record the
/// run in `store`.
pub fn evaluate_and_record(
    store: &RunStore,
    scenario: &Scenario,
    options: &EvaluationOptions,
) -> AppResult<(Evaluation, Option<RunRecord>)> {
    let evaluation = evaluate_scenario(scenario, options)?;
    if !options.save_history {
        debug!("history disabled; run not saved");
        return Ok((evaluation, None));
    }
    let record = save_evaluation(store, &evaluation, &scenario.name)?;
    Ok((evaluation, Some(record)))
}

pub fn list_history(store: &RunStore) -> AppResult<Vec<RunRecord>> {
    Ok(store.list_runs()?)
}

pub fn load_record(store: &RunStore, run_id: &str) -> AppResult<RunRecord> {
    Ok(store.load_run(run_id)?)
}

/// Re-run the engine on a stored snapshot. Nothing is written back.
pub fn replay_run(
    store: &RunStore,
    run_id: &str,
    options: &EvaluationOptions,
) -> AppResult<(RunRecord, Evaluation)> {
    let record = store.load_run(run_id)?;
    info!(run_id, lanes = record.lane_count, "replaying stored run");
    let evaluation = evaluate(&record.lane_snapshot, record.cycle_time_s, options)?;
    Ok((record, evaluation))
}

pub fn delete_run(store: &RunStore, run_id: &str) -> AppResult<()> {
    store.delete_run(run_id)?;
    Ok(())
}
