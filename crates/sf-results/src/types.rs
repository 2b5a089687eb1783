//! Result data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sf_core::{Lane, LaneId};

use crate::ResultsResult;

pub type RunId = String;

/// One saved evaluation: the inputs, the reallocation, and its headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: RunId,
    /// RFC 3339, UTC.
    pub timestamp: String,
    pub scenario_name: String,
    pub engine_version: String,
    pub lane_count: usize,
    pub cycle_time_s: f64,
    pub before_wait_s: f64,
    pub after_wait_s: f64,
    pub wait_improvement_pct: f64,
    pub congestion_reduction_pct: f64,
    pub throughput_gain_pct: f64,
    pub lane_snapshot: Vec<Lane>,
    pub optimized_snapshot: Vec<OptimizedLaneSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedLaneSnapshot {
    pub lane_id: LaneId,
    pub green_time_s: f64,
    pub optimized_green_time_s: u32,
}

impl RunRecord {
    pub fn recorded_at(&self) -> ResultsResult<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(&self.timestamp)?.with_timezone(&Utc))
    }
}

pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339()
}
