//! Signal timing engine.
//!
//! Four pure computations over a caller-owned lane list and a shared cycle:
//! - [`delay`]: per-lane Webster delay, queue, throughput and congestion
//! - [`optimizer`]: demand-proportional green reallocation
//! - [`cycle`]: Webster optimal cycle length (advisory)
//! - [`projector`]: deterministic multi-step queue build-up
//!
//! None of them hold state between calls.

pub mod cycle;
pub mod delay;
pub mod error;
pub mod optimizer;
pub mod projector;

pub use cycle::{OptimalCycleEstimate, estimate_optimal_cycle, estimate_optimal_cycle_detail};
pub use delay::{LaneMetrics, evaluate, evaluate_lane};
pub use error::{ModelError, ModelResult};
pub use optimizer::{OptimizedLane, optimize, usable_green_s};
pub use projector::{DEFAULT_PROJECTION_STEPS, Projection, ProjectionSample, project};
