//! Strictly ordered execution of one sequence.
//!
//! Each op is dispatched only after the previous op's result has been written
//! to the sink, and receives that result as `previous`. Results are streamed,
//! never buffered.

use chrono::Utc;
use tracing::Instrument;

use super::config::ErrorPolicy;
use super::dispatcher::Dispatcher;
use super::event_bus::{EventEmitter, ShuntEvent};
use super::sink::ResultSink;
use crate::domain::model::{OpDescriptor, OpResult};

/// Summary of one finished sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport {
    pub sequence_number: usize,
    /// Number of ops dispatched, which equals the number of results written.
    pub dispatched: usize,
    /// True when [`ErrorPolicy::Abort`] stopped the sequence early.
    pub aborted: bool,
}

enum SequenceState {
    Running {
        index: usize,
        previous: Option<OpResult>,
    },
    Done,
}

#[derive(Clone)]
pub struct SequenceRunner {
    dispatcher: Dispatcher,
    error_policy: ErrorPolicy,
    events: EventEmitter,
}

impl SequenceRunner {
    pub fn new(dispatcher: Dispatcher, error_policy: ErrorPolicy, events: EventEmitter) -> Self {
        Self {
            dispatcher,
            error_policy,
            events,
        }
    }

    /// Run `ops` in order, writing each result to `sink` as it arrives.
    /// Resolves once the sequence is done.
    pub async fn run(
        &self,
        ops: &[OpDescriptor],
        sequence_number: usize,
        sink: &dyn ResultSink,
    ) -> SequenceReport {
        let span = tracing::info_span!("sequence", sequence = sequence_number, ops = ops.len());
        self.drive(ops, sequence_number, sink).instrument(span).await
    }

    async fn drive(
        &self,
        ops: &[OpDescriptor],
        sequence_number: usize,
        sink: &dyn ResultSink,
    ) -> SequenceReport {
        self.events.emit(ShuntEvent::SequenceStarted {
            sequence_number,
            op_count: ops.len(),
            timestamp: Utc::now(),
        });

        let mut dispatched = 0;
        let mut aborted = false;
        let mut state = if ops.is_empty() {
            SequenceState::Done
        } else {
            SequenceState::Running {
                index: 0,
                previous: None,
            }
        };

        while let SequenceState::Running { index, previous } = state {
            let descriptor = ops[index].clone().with_sequence_number(sequence_number);
            let result = self.dispatcher.dispatch(&descriptor, previous.as_ref()).await;
            dispatched += 1;

            tracing::debug!(index, id = %result.id, status = %result.status, "op completed");
            if self.events.is_active() {
                self.events.emit(ShuntEvent::OpCompleted {
                    sequence_number,
                    index,
                    id: result.id.clone(),
                    status: result.status.clone(),
                    timestamp: Utc::now(),
                });
            }

            let has_next = index + 1 < ops.len();
            let abort = has_next
                && self.error_policy == ErrorPolicy::Abort
                && result.status.is_failure();

            // The chained copy must be taken before the sink owns the result.
            let next_previous = has_next.then(|| result.clone());
            sink.write(result).await;

            state = if abort {
                tracing::warn!(
                    index,
                    skipped = ops.len() - index - 1,
                    "aborting sequence after failed op"
                );
                aborted = true;
                SequenceState::Done
            } else if let Some(previous) = next_previous {
                SequenceState::Running {
                    index: index + 1,
                    previous: Some(previous),
                }
            } else {
                SequenceState::Done
            };
        }

        self.events.emit(ShuntEvent::SequenceFinished {
            sequence_number,
            dispatched,
            aborted,
            timestamp: Utc::now(),
        });

        SequenceReport {
            sequence_number,
            dispatched,
            aborted,
        }
    }
}
