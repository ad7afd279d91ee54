//! # Shunt, an operation dispatch and sequencing engine
//!
//! `shunt` executes externally supplied descriptions of work against a
//! registry of named asynchronous capabilities ("operatives") and streams the
//! results to a sink as they complete.
//!
//! - **Registry**: operation name → [`Operative`]; last registration wins.
//! - **Dispatch**: one descriptor → one [`OpResult`]. Unknown operations yield
//!   a `"Not understood"` result without invoking anything.
//! - **Sequences**: ops run strictly one after another, each receiving the
//!   previous op's result. Results are written to the sink in order.
//! - **Groups**: every sequence of a group runs as its own task; the sink is
//!   ended exactly once, after the last sequence is done.
//!
//! Failures are data: operative errors, panics and dropped completions all
//! become results, and a sequence keeps going unless configured with
//! [`ErrorPolicy::Abort`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use serde_json::json;
//! use shunt::{CallbackOperative, CollectingSink, Completer, OpDescriptor, Shunt};
//!
//! #[tokio::main]
//! async fn main() {
//!     let shunt = Shunt::new();
//!     shunt.add_operative(
//!         "echo",
//!         CallbackOperative::new(|params, done: Completer, _prev| done.complete("Echo", params)),
//!     );
//!
//!     let sink = Arc::new(CollectingSink::new());
//!     let group = vec![vec![OpDescriptor::new("a", "echo", json!([1, 2]))]];
//!     shunt.run_sequence_group(group, sink.clone()).await;
//!     println!("{:?}", sink.results());
//! }
//! ```

pub mod api;
pub mod core;
pub mod domain;
pub mod dsl;
pub mod error;
pub mod operatives;

pub use crate::api::{Shunt, ShuntBuilder};
pub use crate::core::{
    channel_sink, create_event_channel, ChannelSink, CollectingSink, Dispatcher, EngineConfig,
    ErrorPolicy, EventReceiver, EventSender, GroupReport, GroupRunner, ResultSink, SequenceReport,
    SequenceRunner, ShuntEvent, SinkEvent,
};
pub use crate::domain::model::{
    Completion, OpDescriptor, OpResult, OpStatus, Sequence, SequenceGroup, NOT_UNDERSTOOD,
};
pub use crate::dsl::{parse_group, GroupFormat};
pub use crate::error::{OperativeError, OperativeResult, ShuntError, ShuntResult};
pub use crate::operatives::{CallbackOperative, Completer, Operative, OperativeRegistry};
