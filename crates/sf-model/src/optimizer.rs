//! Green-time reallocation across the lanes sharing one cycle.

use serde::{Deserialize, Serialize};
use sf_core::units::constants::{LOST_TIME_PER_PHASE_S, MIN_GREEN_S, MIN_USABLE_GREEN_S};
use sf_core::{Lane, LaneId, Real};
use tracing::debug;

use crate::error::{ModelError, ModelResult, check_count, check_non_negative, check_positive};

/// A lane paired with its reallocated green. The source lane is copied,
/// never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedLane {
    pub lane: Lane,
    pub optimized_green_time_s: u32,
}

impl OptimizedLane {
    pub fn id(&self) -> LaneId {
        self.lane.id
    }

    /// The lane as it would run under the optimized green.
    pub fn to_lane(&self) -> Lane {
        self.lane.with_green(Real::from(self.optimized_green_time_s))
    }

    /// Signed change against the lane's current green.
    pub fn green_delta_s(&self) -> Real {
        Real::from(self.optimized_green_time_s) - self.lane.green_time_s
    }
}

/// Green time left once each phase has paid its intergreen loss.
pub fn usable_green_s(lane_count: usize, cycle_time_s: Real) -> Real {
    let lost = LOST_TIME_PER_PHASE_S * lane_count as Real;
    (cycle_time_s - lost).max(MIN_USABLE_GREEN_S)
}

/// Split the usable green in proportion to weighted demand.
///
/// Every lane gets at least `MIN_GREEN_S`. The floor and the two rounding
/// passes mean the total only approximates the usable green.
pub fn optimize(lanes: &[Lane], cycle_time_s: Real) -> ModelResult<Vec<OptimizedLane>> {
    if lanes.is_empty() {
        return Err(ModelError::DegenerateInput {
            what: "optimizer needs at least one lane",
        });
    }
    let cycle = check_positive(cycle_time_s, "cycle_time_s")?;

    let weights = lanes
        .iter()
        .map(|lane| -> ModelResult<Real> {
            check_non_negative(lane.vehicles_per_cycle, "vehicles_per_cycle")?;
            Ok(lane.weighted_demand())
        })
        .collect::<ModelResult<Vec<Real>>>()?;

    let usable = usable_green_s(lanes.len(), cycle);
    let total_weight: Real = weights.iter().sum();
    // All-zero demand falls through to an equal split via the floor.
    let total_weight = if total_weight > 0.0 { total_weight } else { 1.0 };

    let proportional: Vec<Real> = weights
        .iter()
        .map(|w| floor_green((w / total_weight * usable).round()))
        .collect();

    let allocated: Real = proportional.iter().sum();
    let scale = usable / allocated;

    let optimized = lanes
        .iter()
        .zip(&proportional)
        .map(|(lane, green)| -> ModelResult<OptimizedLane> {
            Ok(OptimizedLane {
                lane: lane.clone(),
                optimized_green_time_s: check_count(
                    floor_green((green * scale).round()),
                    "optimized_green_time_s",
                )?,
            })
        })
        .collect::<ModelResult<Vec<OptimizedLane>>>()?;

    debug!(
        lanes = lanes.len(),
        cycle_s = cycle,
        usable_s = usable,
        allocated_s = optimized
            .iter()
            .map(|o| u64::from(o.optimized_green_time_s))
            .sum::<u64>(),
        "green time reallocated"
    );

    Ok(optimized)
}

fn floor_green(green_s: Real) -> Real {
    green_s.max(MIN_GREEN_S)
}
