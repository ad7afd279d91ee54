//! Engine-level error types.

use thiserror::Error;

/// Engine-level errors
#[derive(Debug, Error)]
pub enum ShuntError {
    #[error("Group parse error: {0}")]
    GroupParseError(String),
    #[error("Config parse error: {0}")]
    ConfigParseError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
