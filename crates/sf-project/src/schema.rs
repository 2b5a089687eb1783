//! Scenario schema definitions.
//!
//! Lane type and density are kept as raw strings here so that an unknown
//! key surfaces as a validation error naming the lane, not a parse error.

use serde::{Deserialize, Serialize};
use sf_core::{DensityLevel, Lane, LaneType};

use crate::validate::ValidationError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub cycle_time_s: f64,
    #[serde(default)]
    pub lanes: Vec<LaneDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaneDef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub lane_type: String,
    pub density: String,
    pub vehicles_per_cycle: f64,
    pub green_time_s: f64,
}

impl LaneDef {
    pub fn to_lane(&self) -> Result<Lane, ValidationError> {
        let lane_type: LaneType =
            self.lane_type
                .parse()
                .map_err(|_| ValidationError::InvalidLaneType {
                    lane_id: self.id,
                    value: self.lane_type.clone(),
                })?;
        let density: DensityLevel =
            self.density
                .parse()
                .map_err(|_| ValidationError::InvalidDensity {
                    lane_id: self.id,
                    value: self.density.clone(),
                })?;
        Ok(Lane::new(
            self.id,
            self.name.clone(),
            lane_type,
            density,
            self.vehicles_per_cycle,
            self.green_time_s,
        ))
    }
}

impl From<&Lane> for LaneDef {
    fn from(lane: &Lane) -> Self {
        Self {
            id: lane.id.get(),
            name: lane.name.clone(),
            lane_type: lane.lane_type.as_str().to_string(),
            density: lane.density.as_str().to_string(),
            vehicles_per_cycle: lane.vehicles_per_cycle,
            green_time_s: lane.green_time_s,
        }
    }
}

impl Scenario {
    /// Build a scenario around engine lanes.
    pub fn from_lanes(name: impl Into<String>, cycle_time_s: f64, lanes: &[Lane]) -> Self {
        Self {
            version: crate::validate::LATEST_VERSION,
            name: name.into(),
            cycle_time_s,
            lanes: lanes.iter().map(LaneDef::from).collect(),
        }
    }

    /// Parse every lane definition into an engine lane.
    pub fn lanes(&self) -> Result<Vec<Lane>, ValidationError> {
        self.lanes.iter().map(LaneDef::to_lane).collect()
    }
}
