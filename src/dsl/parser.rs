//! Group parser: converts raw JSON/YAML text into a [`SequenceGroup`].

use crate::domain::model::SequenceGroup;
use crate::error::{ShuntError, ShuntResult};

/// Supported group input formats.
#[derive(Debug, Clone, Copy)]
pub enum GroupFormat {
    /// JSON format (`.json`).
    Json,
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
}

impl GroupFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(GroupFormat::Json),
            "yaml" | "yml" => Some(GroupFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a list of sequences, each a list of op descriptors.
pub fn parse_group(content: &str, format: GroupFormat) -> ShuntResult<SequenceGroup> {
    match format {
        GroupFormat::Json => serde_json::from_str(content)
            .map_err(|e| ShuntError::GroupParseError(e.to_string())),
        GroupFormat::Yaml => serde_saphyr::from_str(content)
            .map_err(|e| ShuntError::GroupParseError(e.to_string())),
    }
}
