//! Lane delay model.
//!
//! Webster's deterministic delay applied at cycle granularity: demand and
//! capacity are both counted in vehicles per cycle rather than per hour.

use serde::{Deserialize, Serialize};
use sf_core::units::constants::{
    CONGESTION_SCALE, MAX_DELAY_RATIO, MAX_DELAY_S, MAX_VC_RATIO, saturation_flow,
};
use sf_core::{DensityLevel, EPSILON_CAPACITY, Lane, Real, s, vehicles_discharged};

use crate::error::{ModelResult, check_count, check_non_negative, check_positive};

/// Derived per-lane performance figures. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneMetrics {
    /// Arrivals per cycle scaled by the density band.
    pub effective_demand: Real,
    /// Vehicles the lane can discharge during its green.
    pub capacity: Real,
    /// Demand over capacity, clamped to `MAX_VC_RATIO`.
    pub volume_capacity_ratio: Real,
    /// Average delay per vehicle, clamped to `MAX_DELAY_S`.
    pub average_delay_s: Real,
    /// Vehicles left over at the end of green.
    pub queue_length: u32,
    pub throughput: Real,
    /// Bounded display proxy in `0..=100`.
    pub congestion_pct: u32,
}

/// Evaluate one lane from raw inputs.
///
/// A green at or above the cycle is accepted; the green share is clamped to 1.
pub fn evaluate_lane(
    vehicles_per_cycle: Real,
    green_time_s: Real,
    cycle_time_s: Real,
    density: DensityLevel,
) -> ModelResult<LaneMetrics> {
    let vehicles = check_non_negative(vehicles_per_cycle, "vehicles_per_cycle")?;
    let green = check_non_negative(green_time_s, "green_time_s")?;
    let cycle = check_positive(cycle_time_s, "cycle_time_s")?;

    let effective_demand = vehicles * density.multiplier();
    let capacity = vehicles_discharged(saturation_flow(), s(green));
    let ratio = (effective_demand / capacity.max(EPSILON_CAPACITY)).min(MAX_VC_RATIO);
    let green_share = (green / cycle).min(1.0);

    let average_delay_s =
        (uniform_delay(cycle, green_share, ratio) + overflow_delay(ratio)).min(MAX_DELAY_S);
    let queue_length = check_count((effective_demand - capacity).max(0.0), "queue_length")?;

    Ok(LaneMetrics {
        effective_demand,
        capacity,
        volume_capacity_ratio: ratio,
        average_delay_s,
        queue_length,
        throughput: effective_demand.min(capacity),
        congestion_pct: (ratio * CONGESTION_SCALE).round().min(100.0) as u32,
    })
}

/// Evaluate a lane at its own green allocation.
pub fn evaluate(lane: &Lane, cycle_time_s: Real) -> ModelResult<LaneMetrics> {
    evaluate_lane(
        lane.vehicles_per_cycle,
        lane.green_time_s,
        cycle_time_s,
        lane.density,
    )
}

/// First Webster term. The ratio is capped just below 1 so the denominator
/// stays positive at saturation.
fn uniform_delay(cycle_s: Real, green_share: Real, ratio: Real) -> Real {
    let x = ratio.min(MAX_DELAY_RATIO);
    let red_share = 1.0 - green_share;
    cycle_s * red_share * red_share / (2.0 * (1.0 - x * green_share))
}

/// Oversaturation term, zero below capacity.
fn overflow_delay(ratio: Real) -> Real {
    if ratio < 1.0 {
        return 0.0;
    }
    let excess = ratio - 1.0;
    900.0 * (excess + (excess * excess + ratio / 450.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    fn close(a: Real, b: Real) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn oversaturated_lane_clamps_ratio_and_delay() {
        let m = evaluate_lane(10.0, 10.0, 90.0, DensityLevel::High).unwrap();
        assert!(close(m.effective_demand, 15.0));
        assert!(close(m.capacity, 5.0));
        assert!(close(m.volume_capacity_ratio, MAX_VC_RATIO));
        assert!(close(m.average_delay_s, MAX_DELAY_S));
        assert_eq!(m.queue_length, 10);
        assert!(close(m.throughput, 5.0));
        assert_eq!(m.congestion_pct, 100);
    }

    #[test]
    fn light_lane_has_no_queue() {
        let m = evaluate_lane(3.0, 30.0, 90.0, DensityLevel::Medium).unwrap();
        assert!(close(m.effective_demand, 3.0));
        assert!(close(m.capacity, 15.0));
        assert!(close(m.volume_capacity_ratio, 0.2));
        assert!(m.average_delay_s < 30.0);
        // 90 * (2/3)^2 / (2 * (1 - 0.2/3))
        assert!(close(m.average_delay_s, 40.0 / (2.0 * (1.0 - 0.2 / 3.0))));
        assert_eq!(m.queue_length, 0);
        assert!(close(m.throughput, 3.0));
        assert_eq!(m.congestion_pct, 13);
    }

    #[test]
    fn overflow_term_starts_at_capacity() {
        assert_eq!(overflow_delay(0.999), 0.0);
        let at_capacity = overflow_delay(1.0);
        assert!(close(at_capacity, 900.0 * (1.0_f64 / 450.0).sqrt()));
    }

    #[test]
    fn zero_green_uses_capacity_floor() {
        let m = evaluate_lane(4.0, 0.0, 60.0, DensityLevel::Low).unwrap();
        assert_eq!(m.capacity, 0.0);
        assert!(close(m.volume_capacity_ratio, MAX_VC_RATIO));
        assert!(m.average_delay_s.is_finite());
        assert_eq!(m.queue_length, 2);

        let idle = evaluate_lane(0.0, 0.0, 60.0, DensityLevel::Low).unwrap();
        assert_eq!(idle.volume_capacity_ratio, 0.0);
        assert!(close(idle.average_delay_s, 30.0));
    }

    #[test]
    fn green_past_cycle_is_clamped_not_rejected() {
        let m = evaluate_lane(5.0, 120.0, 90.0, DensityLevel::Medium).unwrap();
        assert_eq!(m.average_delay_s, 0.0);
        assert_eq!(m.queue_length, 0);
    }

    #[test]
    fn invalid_numbers_fail_fast() {
        assert!(evaluate_lane(-1.0, 10.0, 90.0, DensityLevel::Low).is_err());
        assert!(evaluate_lane(1.0, f64::NAN, 90.0, DensityLevel::Low).is_err());
        assert!(evaluate_lane(1.0, 10.0, 0.0, DensityLevel::Low).is_err());
    }

    #[test]
    fn queue_too_large_to_count_is_rejected() {
        let err = evaluate_lane(1e12, 10.0, 90.0, DensityLevel::Low).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidInput {
                what: "queue_length",
                ..
            }
        ));

        // Largest demand whose leftover queue still fits.
        let m = evaluate_lane(4.0e9, 10.0, 90.0, DensityLevel::Medium).unwrap();
        assert_eq!(m.queue_length, 3_999_999_995);
    }

    #[test]
    fn lane_helper_matches_raw_call() {
        let lane = Lane::new(
            1,
            "North",
            sf_core::LaneType::Turn,
            DensityLevel::Peak,
            6.0,
            24.0,
        );
        assert_eq!(
            evaluate(&lane, 100.0).unwrap(),
            evaluate_lane(6.0, 24.0, 100.0, DensityLevel::Peak).unwrap()
        );
    }
}
