//! Adapter for operatives written in completion-callback style.
//!
//! The callback receives a [`Completer`] it must consume exactly once, either
//! immediately or later from another task. Consuming it twice cannot compile;
//! dropping it unused is reported as a handler fault.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use super::Operative;
use crate::domain::model::{Completion, OpResult, OpStatus};
use crate::error::{OperativeError, OperativeResult};

/// One-shot completion handle passed to a callback operative.
pub struct Completer {
    tx: oneshot::Sender<Completion>,
}

impl Completer {
    pub fn complete(self, status: impl Into<OpStatus>, value: Value) {
        // The receiver only goes away when the dispatch future was dropped.
        let _ = self.tx.send(Completion::new(status, value));
    }

    pub fn fail(self, error: OperativeError) {
        let _ = self.tx.send(Completion::failed(error.to_string()));
    }
}

/// Wraps a `Fn(params, completer, previous)` closure as an [`Operative`].
pub struct CallbackOperative<F> {
    callback: F,
}

impl<F> CallbackOperative<F>
where
    F: Fn(Value, Completer, Option<OpResult>) + Send + Sync + 'static,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

#[async_trait]
impl<F> Operative for CallbackOperative<F>
where
    F: Fn(Value, Completer, Option<OpResult>) + Send + Sync + 'static,
{
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        let (tx, rx) = oneshot::channel();
        (self.callback)(params.clone(), Completer { tx }, previous.cloned());
        rx.await.map_err(|_| OperativeError::CompletionDropped)
    }
}
