//! Result sinks, the streaming consumers that runners write into.

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::domain::model::OpResult;

/// Streaming consumer of results.
///
/// `write` may be called concurrently from several sequences. `end` is called
/// once per group, after the last write of that group.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn write(&self, result: OpResult);
    async fn end(&self);
}

/// Item delivered by a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Result(OpResult),
    End,
}

/// Forwards everything to a single receiving owner.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<SinkEvent>) -> Self {
        Self { tx }
    }
}

/// Create a channel-backed sink and its receiver.
pub fn channel_sink() -> (ChannelSink, mpsc::UnboundedReceiver<SinkEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChannelSink::new(tx), rx)
}

#[async_trait]
impl ResultSink for ChannelSink {
    async fn write(&self, result: OpResult) {
        if self.tx.send(SinkEvent::Result(result)).is_err() {
            tracing::trace!("sink receiver dropped; discarding result");
        }
    }

    async fn end(&self) {
        let _ = self.tx.send(SinkEvent::End);
    }
}

#[derive(Default)]
struct Collected {
    results: Vec<OpResult>,
    end_count: usize,
}

/// Records results in arrival order behind a lock.
#[derive(Default)]
pub struct CollectingSink {
    inner: Mutex<Collected>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Vec<OpResult> {
        self.inner.lock().results.clone()
    }

    pub fn end_count(&self) -> usize {
        self.inner.lock().end_count
    }

    pub fn is_ended(&self) -> bool {
        self.end_count() > 0
    }
}

#[async_trait]
impl ResultSink for CollectingSink {
    async fn write(&self, result: OpResult) {
        let mut inner = self.inner.lock();
        if inner.end_count > 0 {
            tracing::warn!(id = %result.id, "result written after end of stream");
        }
        inner.results.push(result);
    }

    async fn end(&self) {
        self.inner.lock().end_count += 1;
    }
}
