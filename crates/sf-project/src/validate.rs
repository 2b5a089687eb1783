//! Scenario validation logic.

use std::collections::HashSet;

use sf_core::units::constants::PRACTICAL_CYCLE_RANGE_S;
use tracing::warn;

use crate::schema::Scenario;

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Scenario '{name}' has no lanes")]
    NoLanes { name: String },

    #[error("Duplicate lane id: {id}")]
    DuplicateId { id: u32 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lane {lane_id}: unrecognized density level '{value}'")]
    InvalidDensity { lane_id: u32, value: String },

    #[error("Lane {lane_id}: unrecognized lane type '{value}'")]
    InvalidLaneType { lane_id: u32, value: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let cycle = scenario.cycle_time_s;
    if !cycle.is_finite() || cycle <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: "cycle_time_s".to_string(),
            value: cycle.to_string(),
            reason: "must be a positive number of seconds".to_string(),
        });
    }
    let (lo, hi) = PRACTICAL_CYCLE_RANGE_S;
    if !(lo..=hi).contains(&cycle) {
        warn!(cycle_s = cycle, "cycle length outside the usual {lo}-{hi} s range");
    }

    if scenario.lanes.is_empty() {
        return Err(ValidationError::NoLanes {
            name: scenario.name.clone(),
        });
    }

    let mut ids = HashSet::new();
    for lane in &scenario.lanes {
        if !ids.insert(lane.id) {
            return Err(ValidationError::DuplicateId { id: lane.id });
        }
        non_negative(lane.id, "vehicles_per_cycle", lane.vehicles_per_cycle)?;
        non_negative(lane.id, "green_time_s", lane.green_time_s)?;
        lane.to_lane()?;

        if lane.green_time_s >= cycle {
            warn!(
                lane_id = lane.id,
                green_s = lane.green_time_s,
                cycle_s = cycle,
                "green time does not fit inside the cycle; green share will be clamped"
            );
        }
    }

    Ok(())
}

fn non_negative(lane_id: u32, field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: format!("lane {lane_id} {field}"),
        value: value.to_string(),
        reason: "must be a finite, non-negative number".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LaneDef;

    fn lane(id: u32, density: &str) -> LaneDef {
        LaneDef {
            id,
            name: format!("lane {id}"),
            lane_type: "straight".to_string(),
            density: density.to_string(),
            vehicles_per_cycle: 5.0,
            green_time_s: 20.0,
        }
    }

    fn scenario(lanes: Vec<LaneDef>) -> Scenario {
        Scenario {
            version: 1,
            name: "test".to_string(),
            cycle_time_s: 90.0,
            lanes,
        }
    }

    #[test]
    fn accepts_minimal_scenario() {
        validate_scenario(&scenario(vec![lane(1, "medium")])).unwrap();
    }

    #[test]
    fn rejects_empty_lanes() {
        assert!(matches!(
            validate_scenario(&scenario(vec![])),
            Err(ValidationError::NoLanes { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = validate_scenario(&scenario(vec![lane(4, "low"), lane(4, "high")])).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { id: 4 });
    }

    #[test]
    fn rejects_unknown_density() {
        let err = validate_scenario(&scenario(vec![lane(2, "rush")])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDensity {
                lane_id: 2,
                value: "rush".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_lane_type() {
        let mut bad = lane(3, "low");
        bad.lane_type = "diagonal".to_string();
        assert!(matches!(
            validate_scenario(&scenario(vec![bad])),
            Err(ValidationError::InvalidLaneType { lane_id: 3, .. })
        ));
    }

    #[test]
    fn rejects_negative_and_nan_inputs() {
        let mut neg = lane(1, "low");
        neg.vehicles_per_cycle = -1.0;
        assert!(validate_scenario(&scenario(vec![neg])).is_err());

        let mut nan = lane(1, "low");
        nan.green_time_s = f64::NAN;
        assert!(validate_scenario(&scenario(vec![nan])).is_err());
    }

    #[test]
    fn rejects_bad_cycle_and_version() {
        let mut s = scenario(vec![lane(1, "low")]);
        s.cycle_time_s = 0.0;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::InvalidValue { .. })
        ));

        let mut s = scenario(vec![lane(1, "low")]);
        s.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_scenario(&s),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn green_past_cycle_is_only_a_warning() {
        let mut long = lane(1, "low");
        long.green_time_s = 120.0;
        validate_scenario(&scenario(vec![long])).unwrap();
    }
}
