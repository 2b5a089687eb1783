//! Shared application service layer for signalflow.
//!
//! Composes the engine into the before/optimize/after/project pipeline and
//! handles scenario files, run history and export for the CLI.

pub mod error;
pub mod evaluation;
pub mod export;
pub mod history_service;
pub mod scenario_service;
pub mod summary;

/// Version stamped into run ids and history records.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use evaluation::{
    Evaluation, EvaluationOptions, LaneComparison, evaluate, evaluate_batch, evaluate_scenario,
};
pub use export::{metrics_to_csv, projection_to_csv};
pub use history_service::{
    delete_run, evaluate_and_record, list_history, load_record, record_for, replay_run,
    save_evaluation,
};
pub use scenario_service::{load_scenario, save_scenario, scenario_lanes, write_default_scenario};
pub use summary::ComparisonSummary;
