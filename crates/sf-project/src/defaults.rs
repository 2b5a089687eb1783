//! Built-in starting configuration.

use sf_core::{DensityLevel, Lane, LaneType};

use crate::schema::Scenario;

pub const DEFAULT_CYCLE_S: f64 = 90.0;

/// Five-lane intersection where both high-density through lanes are short
/// of green and the two turn lanes have more than they need.
pub fn default_lanes() -> Vec<Lane> {
    vec![
        Lane::new(1, "North Straight", LaneType::Straight, DensityLevel::High, 8.0, 15.0),
        Lane::new(2, "South Straight", LaneType::Straight, DensityLevel::High, 7.0, 15.0),
        Lane::new(3, "East Left Turn", LaneType::Turn, DensityLevel::Low, 4.0, 25.0),
        Lane::new(4, "West Left Turn", LaneType::Turn, DensityLevel::Medium, 3.0, 20.0),
        Lane::new(5, "East-West Through", LaneType::Straight, DensityLevel::Medium, 5.0, 15.0),
    ]
}

pub fn default_scenario() -> Scenario {
    Scenario::from_lanes("Default intersection", DEFAULT_CYCLE_S, &default_lanes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_scenario;

    #[test]
    fn default_is_valid_and_fills_the_cycle() {
        let scenario = default_scenario();
        validate_scenario(&scenario).unwrap();
        let total: f64 = scenario.lanes.iter().map(|l| l.green_time_s).sum();
        assert_eq!(total, DEFAULT_CYCLE_S);
    }

    #[test]
    fn default_round_trips_through_lane_defs() {
        assert_eq!(default_scenario().lanes().unwrap(), default_lanes());
    }
}
