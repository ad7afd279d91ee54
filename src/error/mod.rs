//! Error types for the shunt engine.
//!
//! - [`OperativeError`]: Errors an operative reports instead of a completion.
//! - [`ShuntError`]: Errors raised while parsing groups or loading configuration.
//!
//! Neither type escapes a running group: operative errors become result data.

pub mod operative_error;
pub mod shunt_error;

pub use operative_error::OperativeError;
pub use shunt_error::ShuntError;

/// Convenience alias for operative results.
pub type OperativeResult<T> = Result<T, OperativeError>;
/// Convenience alias for engine-level results.
pub type ShuntResult<T> = Result<T, ShuntError>;
