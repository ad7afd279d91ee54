use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::model::OpStatus;

/// Engine lifecycle events, delivered alongside (never instead of) sink writes.
#[derive(Clone, Debug, Serialize)]
pub enum ShuntEvent {
    SequenceStarted {
        sequence_number: usize,
        op_count: usize,
        timestamp: DateTime<Utc>,
    },

    OpCompleted {
        sequence_number: usize,
        index: usize,
        id: Value,
        status: OpStatus,
        timestamp: DateTime<Utc>,
    },

    SequenceFinished {
        sequence_number: usize,
        dispatched: usize,
        aborted: bool,
        timestamp: DateTime<Utc>,
    },

    GroupFinished {
        sequence_count: usize,
        results_written: usize,
        timestamp: DateTime<Utc>,
    },
}

pub type EventSender = mpsc::UnboundedSender<ShuntEvent>;

pub type EventReceiver = mpsc::UnboundedReceiver<ShuntEvent>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Optional event sender; emission is skipped when nobody listens.
#[derive(Clone, Default)]
pub struct EventEmitter {
    tx: Option<EventSender>,
}

impl EventEmitter {
    pub fn new(tx: Option<EventSender>) -> Self {
        Self { tx }
    }

    #[inline(always)]
    pub fn is_active(&self) -> bool {
        self.tx.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    pub fn emit(&self, event: ShuntEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
