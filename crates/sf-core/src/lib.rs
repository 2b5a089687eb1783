//! sf-core: stable foundation for signalflow.
//!
//! Contains:
//! - units (uom SI types + constructors, fixed engine constants)
//! - numeric (Real + input guards + rounding helpers)
//! - ids (lane identifiers)
//! - lane (the lane record handed to the engine)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod lane;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SfError, SfResult};
pub use ids::*;
pub use lane::{DensityLevel, Lane, LaneType};
pub use numeric::*;
pub use units::*;
