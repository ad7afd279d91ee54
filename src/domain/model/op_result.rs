use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Status text for descriptors that name no registered operative.
pub const NOT_UNDERSTOOD: &str = "Not understood";

/// Outcome indicator carried by every result.
///
/// Tags are handler-defined and opaque to the engine, so a tag such as
/// `"Failed"` is never treated as a failure by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpStatus {
    Success,
    Tag(String),
    /// The operative returned an error instead of a completion.
    Error(String),
    NotUnderstood,
    /// The operative panicked or dropped its completion.
    HandlerFault(String),
}

impl OpStatus {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OpStatus::Success => None,
            OpStatus::Tag(tag) => Some(tag),
            OpStatus::Error(message) | OpStatus::HandlerFault(message) => Some(message),
            OpStatus::NotUnderstood => Some(NOT_UNDERSTOOD),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            OpStatus::Error(_) | OpStatus::NotUnderstood | OpStatus::HandlerFault(_)
        )
    }
}

impl fmt::Display for OpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("null"))
    }
}

impl From<&str> for OpStatus {
    fn from(tag: &str) -> Self {
        OpStatus::Tag(tag.to_string())
    }
}

impl From<String> for OpStatus {
    fn from(tag: String) -> Self {
        OpStatus::Tag(tag)
    }
}

impl PartialEq<&str> for OpStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl Serialize for OpStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OpStatus::Success => serializer.serialize_none(),
            OpStatus::Tag(tag) => serializer.serialize_str(tag),
            OpStatus::NotUnderstood => serializer.serialize_str(NOT_UNDERSTOOD),
            OpStatus::Error(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", message)?;
                map.end()
            }
            OpStatus::HandlerFault(message) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("fault", message)?;
                map.end()
            }
        }
    }
}

/// What an operative hands back for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub status: OpStatus,
    pub value: Value,
}

impl Completion {
    pub fn new(status: impl Into<OpStatus>, value: Value) -> Self {
        Self {
            status: status.into(),
            value,
        }
    }

    pub fn tagged(tag: impl Into<String>, value: Value) -> Self {
        Self::new(OpStatus::Tag(tag.into()), value)
    }

    pub fn success(value: Value) -> Self {
        Self::new(OpStatus::Success, value)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(OpStatus::Error(message.into()), Value::Null)
    }
}

/// Normalized outcome of dispatching one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpResult {
    pub id: Value,
    pub status: OpStatus,
    pub value: Value,
}

impl OpResult {
    pub fn from_completion(id: Value, completion: Completion) -> Self {
        Self {
            id,
            status: completion.status,
            value: completion.value,
        }
    }

    pub fn not_understood(id: Value) -> Self {
        Self {
            id,
            status: OpStatus::NotUnderstood,
            value: Value::Null,
        }
    }

    pub fn handler_fault(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            status: OpStatus::HandlerFault(message.into()),
            value: Value::Null,
        }
    }
}
