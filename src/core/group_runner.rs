//! Concurrent execution of a sequence group.
//!
//! Every sequence runs as its own task. The sink is ended exactly once, after
//! the last sequence task has been joined, so no write can race the end of
//! stream. Results of different sequences interleave freely.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::event_bus::{EventEmitter, ShuntEvent};
use super::sequence_runner::{SequenceReport, SequenceRunner};
use super::sink::ResultSink;
use crate::domain::model::SequenceGroup;

/// Summary of one finished group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport {
    /// Reports of the sequences that finished, ordered by sequence number.
    pub sequences: Vec<SequenceReport>,
    pub results_written: usize,
}

#[derive(Clone)]
pub struct GroupRunner {
    sequences: SequenceRunner,
    concurrency_limit: Option<usize>,
    events: EventEmitter,
}

impl GroupRunner {
    pub fn new(
        sequences: SequenceRunner,
        concurrency_limit: Option<usize>,
        events: EventEmitter,
    ) -> Self {
        Self {
            sequences,
            concurrency_limit,
            events,
        }
    }

    /// Run every sequence of `group` concurrently, then end `sink`.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run(&self, group: SequenceGroup, sink: Arc<dyn ResultSink>) -> GroupReport {
        let total = group.len();
        let semaphore = self
            .concurrency_limit
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        let mut join_set = JoinSet::new();
        for (sequence_number, sequence) in group.into_iter().enumerate() {
            let runner = self.sequences.clone();
            let sink = sink.clone();
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                runner.run(&sequence, sequence_number, sink.as_ref()).await
            });
        }

        let mut finished = 0usize;
        let mut reports = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next().await {
            finished += 1;
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => tracing::error!(error = %e, "sequence task failed"),
            }
            tracing::debug!(finished, total, "sequence finished");
        }

        sink.end().await;

        reports.sort_by_key(|report| report.sequence_number);
        let results_written: usize = reports.iter().map(|report| report.dispatched).sum();
        tracing::info!(sequences = total, results_written, "sequence group finished");
        self.events.emit(ShuntEvent::GroupFinished {
            sequence_count: total,
            results_written,
            timestamp: Utc::now(),
        });

        GroupReport {
            sequences: reports,
            results_written,
        }
    }
}
