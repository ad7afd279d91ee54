//! Caller-facing data model.
//!
//! Descriptors and sequences are immutable inputs to one engine invocation;
//! results are created per dispatch and handed to the sink.

mod descriptor;
mod op_result;

pub use descriptor::{OpDescriptor, Sequence, SequenceGroup};
pub use op_result::{Completion, OpResult, OpStatus, NOT_UNDERSTOOD};
