//! Content-based hashing for run IDs.
//!
//! The id is an exact-match key over everything the engine reads, so two
//! evaluations of the same lanes and cycle share one history entry.

use sf_core::Lane;
use sha2::{Digest, Sha256};

pub fn compute_run_id(lanes: &[Lane], cycle_time_s: f64, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let lanes_json = serde_json::to_string(lanes).unwrap_or_default();
    hasher.update(lanes_json.as_bytes());

    hasher.update(cycle_time_s.to_bits().to_le_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
