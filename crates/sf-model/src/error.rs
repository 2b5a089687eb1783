//! Error types for engine operations.

use sf_core::{Real, ensure_count, ensure_non_negative, ensure_positive};
use thiserror::Error;

/// Errors raised before any computation runs; no operation returns NaN.
///
/// Density and lane-type keys are typed by the time they reach the engine;
/// unknown keys are rejected when a scenario is validated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Degenerate input: {what}")]
    DegenerateInput { what: &'static str },

    #[error("Invalid input: {what} = {value}")]
    InvalidInput { what: &'static str, value: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;

pub(crate) fn check_non_negative(v: Real, what: &'static str) -> ModelResult<Real> {
    ensure_non_negative(v, what).map_err(|_| ModelError::InvalidInput { what, value: v })
}

pub(crate) fn check_positive(v: Real, what: &'static str) -> ModelResult<Real> {
    ensure_positive(v, what).map_err(|_| ModelError::InvalidInput { what, value: v })
}

/// Whole-vehicle or whole-second count that must fit the output field.
pub(crate) fn check_count(v: Real, what: &'static str) -> ModelResult<u32> {
    ensure_count(v, what).map_err(|_| ModelError::InvalidInput { what, value: v })
}
