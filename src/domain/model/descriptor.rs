use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One requested invocation of an operative.
///
/// `id` is an opaque correlation token copied onto the result. The
/// `sequence_number` is stamped by the sequence runner for tracing only and
/// never drives ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpDescriptor {
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<String>,
    #[serde(default)]
    pub params: Value,
    #[serde(
        default,
        alias = "sequenceNumber",
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<usize>,
}

impl OpDescriptor {
    pub fn new(id: impl Into<Value>, op: impl Into<String>, params: Value) -> Self {
        Self {
            id: id.into(),
            op: Some(op.into()),
            params,
            sequence_number: None,
        }
    }

    /// A descriptor that names no operation at all.
    pub fn anonymous(id: impl Into<Value>, params: Value) -> Self {
        Self {
            id: id.into(),
            op: None,
            params,
            sequence_number: None,
        }
    }

    /// The operation name, treating an empty string as absent.
    pub fn op_name(&self) -> Option<&str> {
        self.op.as_deref().filter(|name| !name.is_empty())
    }

    pub fn with_sequence_number(mut self, sequence_number: usize) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }
}

/// Ordered chain of descriptors, executed one at a time.
pub type Sequence = Vec<OpDescriptor>;

/// Sequences scheduled independently of one another.
pub type SequenceGroup = Vec<Sequence>;
