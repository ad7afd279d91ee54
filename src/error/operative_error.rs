use thiserror::Error;

/// Operative-level errors
#[derive(Debug, Error)]
pub enum OperativeError {
    #[error("Invalid params: {0}")]
    InvalidParams(String),
    #[error("Missing previous result")]
    MissingPrevious,
    #[error("Execution error: {0}")]
    ExecutionError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Operative dropped its completion without calling it")]
    CompletionDropped,
}

impl From<serde_json::Error> for OperativeError {
    fn from(e: serde_json::Error) -> Self {
        OperativeError::SerializationError(e.to_string())
    }
}
