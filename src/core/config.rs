//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ShuntError, ShuntResult};

/// What a sequence does after an op produces a failure result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Keep dispatching; the next op sees the failed result as `previous`.
    #[default]
    Continue,
    /// Stop the sequence after writing the first failure result.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub error_policy: ErrorPolicy,
    #[serde(default = "default_parallel_enabled")]
    pub parallel_enabled: bool,
    /// Upper bound on sequences of one group running at once; 0 is unbounded.
    #[serde(default)]
    pub max_concurrency: usize,
}

fn default_parallel_enabled() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            error_policy: ErrorPolicy::Continue,
            parallel_enabled: true,
            max_concurrency: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(content: &str) -> ShuntResult<Self> {
        serde_json::from_str(content).map_err(|e| ShuntError::ConfigParseError(e.to_string()))
    }

    pub fn from_yaml(content: &str) -> ShuntResult<Self> {
        serde_saphyr::from_str(content).map_err(|e| ShuntError::ConfigParseError(e.to_string()))
    }

    /// Effective concurrency limit for one group, `None` when unbounded.
    pub fn concurrency_limit(&self) -> Option<usize> {
        if !self.parallel_enabled {
            Some(1)
        } else if self.max_concurrency == 0 {
            None
        } else {
            Some(self.max_concurrency)
        }
    }
}
