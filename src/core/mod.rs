pub mod config;
pub mod dispatcher;
pub mod event_bus;
pub mod group_runner;
pub mod sequence_runner;
pub mod sink;

pub use config::{EngineConfig, ErrorPolicy};
pub use dispatcher::Dispatcher;
pub use event_bus::{create_event_channel, EventEmitter, EventReceiver, EventSender, ShuntEvent};
pub use group_runner::{GroupReport, GroupRunner};
pub use sequence_runner::{SequenceReport, SequenceRunner};
pub use sink::{channel_sink, ChannelSink, CollectingSink, ResultSink, SinkEvent};
