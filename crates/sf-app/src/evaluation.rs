//! The evaluation pipeline: before metrics, reallocation, after metrics,
//! queue projection and the advisory optimal cycle.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sf_core::{Lane, LaneId};
use sf_model::{
    DEFAULT_PROJECTION_STEPS, LaneMetrics, ModelResult, OptimalCycleEstimate, OptimizedLane,
    Projection, estimate_optimal_cycle_detail, optimize, project,
};
use sf_project::Scenario;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::scenario_service::scenario_lanes;
use crate::summary::ComparisonSummary;

/// Options for one evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationOptions {
    pub projection_steps: usize,
    /// Whether `evaluate_and_record` writes the result to run history.
    pub save_history: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            projection_steps: DEFAULT_PROJECTION_STEPS,
            save_history: true,
        }
    }
}

/// Everything computed for one lane set and cycle. Lane-indexed vectors
/// follow the input lane order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub cycle_time_s: f64,
    pub lanes: Vec<Lane>,
    pub before: Vec<LaneMetrics>,
    pub optimized: Vec<OptimizedLane>,
    pub after: Vec<LaneMetrics>,
    /// Projection of the lanes under their optimized green.
    pub projection: Projection,
    pub optimal_cycle: OptimalCycleEstimate,
    pub summary: ComparisonSummary,
}

/// One row of the before/after table.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneComparison {
    pub lane_id: LaneId,
    pub name: String,
    pub green_before_s: f64,
    pub green_after_s: u32,
    pub delay_before_s: f64,
    pub delay_after_s: f64,
    pub queue_before: u32,
    pub queue_after: u32,
    pub congestion_before_pct: u32,
    pub congestion_after_pct: u32,
}

impl Evaluation {
    /// Lanes the optimizer would run, with their new green.
    pub fn optimized_lanes(&self) -> Vec<Lane> {
        self.optimized.iter().map(OptimizedLane::to_lane).collect()
    }

    pub fn comparison_rows(&self) -> Vec<LaneComparison> {
        self.lanes
            .iter()
            .zip(&self.optimized)
            .zip(self.before.iter().zip(&self.after))
            .map(|((lane, opt), (before, after))| LaneComparison {
                lane_id: lane.id,
                name: lane.name.clone(),
                green_before_s: lane.green_time_s,
                green_after_s: opt.optimized_green_time_s,
                delay_before_s: before.average_delay_s,
                delay_after_s: after.average_delay_s,
                queue_before: before.queue_length,
                queue_after: after.queue_length,
                congestion_before_pct: before.congestion_pct,
                congestion_after_pct: after.congestion_pct,
            })
            .collect()
    }
}

/// Run the full pipeline over caller-owned lanes.
pub fn evaluate(
    lanes: &[Lane],
    cycle_time_s: f64,
    options: &EvaluationOptions,
) -> AppResult<Evaluation> {
    info!(
        lanes = lanes.len(),
        cycle_s = cycle_time_s,
        "evaluating intersection"
    );

    let before = metrics_for(lanes, cycle_time_s)?;
    debug!("before metrics computed");

    let optimized = optimize(lanes, cycle_time_s)?;
    let optimized_lanes: Vec<Lane> = optimized.iter().map(OptimizedLane::to_lane).collect();
    let after = metrics_for(&optimized_lanes, cycle_time_s)?;
    debug!("after metrics computed");

    let projection = project(&optimized_lanes, cycle_time_s, options.projection_steps)?;
    let optimal_cycle = estimate_optimal_cycle_detail(lanes)?;
    let summary = ComparisonSummary::compare(&before, &after);

    info!(
        before_wait_s = summary.before_wait_s,
        after_wait_s = summary.after_wait_s,
        improvement_pct = summary.wait_improvement_pct,
        optimal_cycle_s = optimal_cycle.cycle_s,
        "evaluation complete"
    );

    Ok(Evaluation {
        cycle_time_s,
        lanes: lanes.to_vec(),
        before,
        optimized,
        after,
        projection,
        optimal_cycle,
        summary,
    })
}

pub fn evaluate_scenario(scenario: &Scenario, options: &EvaluationOptions) -> AppResult<Evaluation> {
    let lanes = scenario_lanes(scenario)?;
    evaluate(&lanes, scenario.cycle_time_s, options)
}

/// Evaluate independent scenarios in parallel. Results keep input order;
/// one failing scenario does not affect the others.
pub fn evaluate_batch(
    scenarios: &[Scenario],
    options: &EvaluationOptions,
) -> Vec<AppResult<Evaluation>> {
    scenarios
        .par_iter()
        .map(|scenario| evaluate_scenario(scenario, options))
        .collect()
}

fn metrics_for(lanes: &[Lane], cycle_time_s: f64) -> ModelResult<Vec<LaneMetrics>> {
    lanes
        .iter()
        .map(|lane| sf_model::evaluate(lane, cycle_time_s))
        .collect()
}
