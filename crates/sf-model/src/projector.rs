//! Illustrative queue build-up over successive steps.
//!
//! Each lane's metrics are scaled along a growth ramp with a fixed
//! oscillation keyed by lane id. Nothing is random: identical inputs give
//! identical output.

use serde::{Deserialize, Serialize};
use sf_core::{Lane, LaneId, Real};

use crate::delay::evaluate;
use crate::error::{ModelResult, check_count, check_positive};

pub const DEFAULT_PROJECTION_STEPS: usize = 20;

/// One lane's state at one step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSample {
    pub lane_id: LaneId,
    pub queue: u32,
    pub wait_s: Real,
}

/// Materialized projection: `steps[s]` holds one sample per lane, in lane order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Projection {
    pub steps: Vec<Vec<ProjectionSample>>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Per-step samples for one lane.
    pub fn series_for(&self, lane_id: LaneId) -> Vec<ProjectionSample> {
        self.steps
            .iter()
            .filter_map(|step| step.iter().find(|p| p.lane_id == lane_id).copied())
            .collect()
    }

    pub fn last_step(&self) -> Option<&[ProjectionSample]> {
        self.steps.last().map(Vec::as_slice)
    }
}

/// Project queue and wait for every lane over `steps` steps.
///
/// Zero steps yields an empty projection; an empty lane list yields steps
/// with no samples.
pub fn project(lanes: &[Lane], cycle_time_s: Real, steps: usize) -> ModelResult<Projection> {
    let cycle = check_positive(cycle_time_s, "cycle_time_s")?;

    let base = lanes
        .iter()
        .map(|lane| evaluate(lane, cycle).map(|m| (lane.id, m)))
        .collect::<ModelResult<Vec<_>>>()?;

    let mut out = Vec::with_capacity(steps);
    for step in 0..steps {
        let t = (step + 1) as Real / steps as Real;
        let samples = base
            .iter()
            .map(|(lane_id, metrics)| -> ModelResult<ProjectionSample> {
                let noise = step_noise(step, *lane_id);
                let queue = (Real::from(metrics.queue_length) * (0.6 + 0.4 * t + noise)).max(0.0);
                let wait_s =
                    (metrics.average_delay_s * (0.75 + 0.25 * t + 0.5 * noise)).max(0.0);
                Ok(ProjectionSample {
                    lane_id: *lane_id,
                    queue: check_count(queue, "projected_queue")?,
                    wait_s,
                })
            })
            .collect::<ModelResult<Vec<_>>>()?;
        out.push(samples);
    }

    Ok(Projection { steps: out })
}

/// Fixed oscillation in `[-0.1, 0.1]`.
fn step_noise(step: usize, lane_id: LaneId) -> Real {
    (step as Real * 0.9 + Real::from(lane_id.get()) * 2.1).sin() * 0.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use sf_core::{DensityLevel, LaneType};

    fn lanes() -> Vec<Lane> {
        vec![
            Lane::new(1, "N", LaneType::Straight, DensityLevel::High, 10.0, 10.0),
            Lane::new(2, "E", LaneType::Turn, DensityLevel::Low, 4.0, 25.0),
        ]
    }

    #[test]
    fn shape_matches_steps_and_lanes() {
        let p = project(&lanes(), 90.0, 20).unwrap();
        assert_eq!(p.len(), 20);
        assert!(p.steps.iter().all(|s| s.len() == 2));
        assert_eq!(p.steps[3][1].lane_id, LaneId::new(2));
    }

    #[test]
    fn first_step_uses_noise_at_origin() {
        let p = project(&lanes(), 90.0, 20).unwrap();
        // lane 1: base queue 10, base wait 300, t = 0.05
        let noise = (2.1_f64).sin() * 0.1;
        let first = p.steps[0][0];
        assert_eq!(first.queue, (10.0 * (0.62 + noise)).round() as u32);
        assert!((first.wait_s - 300.0 * (0.7625 + 0.5 * noise)).abs() < 1e-9);
    }

    #[test]
    fn uncongested_lane_never_queues() {
        let p = project(&lanes(), 90.0, 20).unwrap();
        assert!(p.series_for(LaneId::new(2)).iter().all(|s| s.queue == 0));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = project(&lanes(), 90.0, 12).unwrap();
        let b = project(&lanes(), 90.0, 12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_sizes() {
        assert!(project(&lanes(), 90.0, 0).unwrap().is_empty());
        let p = project(&[], 90.0, 3).unwrap();
        assert_eq!(p.len(), 3);
        assert!(p.steps.iter().all(Vec::is_empty));
        assert!(project(&lanes(), 0.0, 3).is_err());
    }

    #[test]
    fn projected_queue_past_count_range_is_rejected() {
        // Base queue fits, but the last step grows it past u32::MAX.
        let lane = Lane::new(1, "N", LaneType::Straight, DensityLevel::Medium, 4.2e9, 10.0);
        assert!(evaluate(&lane, 90.0).is_ok());
        assert!(matches!(
            project(&[lane], 90.0, 20),
            Err(ModelError::InvalidInput {
                what: "projected_queue",
                ..
            })
        ));
    }

    #[test]
    fn noise_is_bounded() {
        for step in 0..50 {
            for id in 0..20 {
                assert!(step_noise(step, LaneId::new(id)).abs() <= 0.1);
            }
        }
    }
}
