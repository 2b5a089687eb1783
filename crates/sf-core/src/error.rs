use thiserror::Error;

pub type SfResult<T> = Result<T, SfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SfError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    #[error("Unrecognized density level: '{value}' (expected low, medium, high or peak)")]
    InvalidDensity { value: String },

    #[error("Unrecognized lane type: '{value}' (expected straight or turn)")]
    InvalidLaneType { value: String },
}
