//! Webster optimal cycle length.
//!
//! Advisory only: the result is reported next to the optimizer output and
//! is never fed back into it.

use serde::{Deserialize, Serialize};
use sf_core::units::constants::{
    CYCLE_LOST_TIME_PER_PHASE_S, MAX_OPTIMAL_CYCLE_S, MIN_CYCLE_DENOMINATOR, MIN_OPTIMAL_CYCLE_S,
    REFERENCE_CYCLE_S, SAT_FLOW_VEH_PER_HOUR,
};
use sf_core::{Lane, Real};
use tracing::debug;

use crate::error::{ModelError, ModelResult, check_non_negative};

/// Intermediate terms of the estimate, kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalCycleEstimate {
    /// Sum of per-lane flow ratios (Webster's Y).
    pub flow_ratio_sum: Real,
    pub total_lost_time_s: Real,
    /// Cycle before clamping.
    pub unclamped_cycle_s: Real,
    pub cycle_s: u32,
}

/// Optimal cycle in whole seconds, within `[40, 180]`.
pub fn estimate_optimal_cycle(lanes: &[Lane]) -> ModelResult<u32> {
    estimate_optimal_cycle_detail(lanes).map(|e| e.cycle_s)
}

pub fn estimate_optimal_cycle_detail(lanes: &[Lane]) -> ModelResult<OptimalCycleEstimate> {
    if lanes.is_empty() {
        return Err(ModelError::DegenerateInput {
            what: "optimal cycle needs at least one lane",
        });
    }

    let mut flow_ratio_sum = 0.0;
    for lane in lanes {
        check_non_negative(lane.vehicles_per_cycle, "vehicles_per_cycle")?;
        // Per-cycle demand read as if observed over the reference cycle.
        let flow_per_hour = lane.weighted_demand() * (3600.0 / REFERENCE_CYCLE_S);
        flow_ratio_sum += flow_per_hour / SAT_FLOW_VEH_PER_HOUR;
    }

    let total_lost_time_s = lanes.len() as Real * CYCLE_LOST_TIME_PER_PHASE_S;
    let denominator = (1.0 - flow_ratio_sum).max(MIN_CYCLE_DENOMINATOR);
    let unclamped_cycle_s = ((1.5 * total_lost_time_s + 5.0) / denominator).round();
    let cycle_s = unclamped_cycle_s.clamp(
        Real::from(MIN_OPTIMAL_CYCLE_S),
        Real::from(MAX_OPTIMAL_CYCLE_S),
    ) as u32;

    debug!(
        lanes = lanes.len(),
        flow_ratio_sum,
        unclamped_cycle_s,
        cycle_s,
        "optimal cycle estimated"
    );

    Ok(OptimalCycleEstimate {
        flow_ratio_sum,
        total_lost_time_s,
        unclamped_cycle_s,
        cycle_s,
    })
}
