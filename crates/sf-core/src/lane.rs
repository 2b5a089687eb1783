//! The lane record handed to the engine.
//!
//! Lanes are owned by the caller and passed by value or reference into
//! every computation; the engine never keeps them.

use core::fmt;
use core::str::FromStr;

use crate::error::SfError;
use crate::ids::LaneId;
use crate::numeric::Real;
use crate::units::constants::TURN_PENALTY;

/// Movement served by a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LaneType {
    Straight,
    Turn,
}

impl LaneType {
    /// Demand weight applied when allocating green time.
    pub fn flow_factor(self) -> Real {
        match self {
            LaneType::Straight => 1.0,
            LaneType::Turn => TURN_PENALTY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LaneType::Straight => "straight",
            LaneType::Turn => "turn",
        }
    }
}

impl fmt::Display for LaneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaneType {
    type Err = SfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straight" => Ok(LaneType::Straight),
            "turn" => Ok(LaneType::Turn),
            _ => Err(SfError::InvalidLaneType {
                value: s.to_string(),
            }),
        }
    }
}

/// Coarse traffic density band for a lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DensityLevel {
    Low,
    Medium,
    High,
    Peak,
}

impl DensityLevel {
    pub const ALL: [DensityLevel; 4] = [
        DensityLevel::Low,
        DensityLevel::Medium,
        DensityLevel::High,
        DensityLevel::Peak,
    ];

    /// Fixed demand multiplier for the band.
    pub fn multiplier(self) -> Real {
        match self {
            DensityLevel::Low => 0.5,
            DensityLevel::Medium => 1.0,
            DensityLevel::High => 1.5,
            DensityLevel::Peak => 2.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DensityLevel::Low => "low",
            DensityLevel::Medium => "medium",
            DensityLevel::High => "high",
            DensityLevel::Peak => "peak",
        }
    }
}

impl fmt::Display for DensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DensityLevel {
    type Err = SfError;

    /// Unknown keys are rejected; there is no fallback band.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(DensityLevel::Low),
            "medium" => Ok(DensityLevel::Medium),
            "high" => Ok(DensityLevel::High),
            "peak" => Ok(DensityLevel::Peak),
            _ => Err(SfError::InvalidDensity {
                value: s.to_string(),
            }),
        }
    }
}

/// One approach lane at the intersection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lane {
    pub id: LaneId,
    /// Display label, unused by the engine.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub lane_type: LaneType,
    pub density: DensityLevel,
    pub vehicles_per_cycle: Real,
    pub green_time_s: Real,
}

impl Lane {
    pub fn new(
        id: impl Into<LaneId>,
        name: impl Into<String>,
        lane_type: LaneType,
        density: DensityLevel,
        vehicles_per_cycle: Real,
        green_time_s: Real,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lane_type,
            density,
            vehicles_per_cycle,
            green_time_s,
        }
    }

    /// Arrivals scaled by the density band. The delay model uses this
    /// directly, without the turn penalty.
    pub fn demand(&self) -> Real {
        self.vehicles_per_cycle * self.density.multiplier()
    }

    /// Demand including the turn penalty, as weighted by the optimizer
    /// and the optimal-cycle estimate.
    pub fn weighted_demand(&self) -> Real {
        self.demand() * self.lane_type.flow_factor()
    }

    /// Copy of this lane with a different green allocation.
    pub fn with_green(&self, green_time_s: Real) -> Self {
        Self {
            green_time_s,
            ..self.clone()
        }
    }
}
