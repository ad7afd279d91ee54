//! Single-op dispatch.
//!
//! The [`Dispatcher`] resolves a descriptor's operation name against the
//! [`OperativeRegistry`], invokes the operative and normalizes whatever comes
//! back into an [`OpResult`]. Unknown names short-circuit to a
//! "Not understood" result without touching any operative. Operative panics
//! and dropped completions are contained here and surface as
//! [`OpStatus::HandlerFault`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::RwLock;

use crate::domain::model::{OpDescriptor, OpResult, OpStatus};
use crate::error::OperativeError;
use crate::operatives::OperativeRegistry;

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RwLock<OperativeRegistry>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RwLock<OperativeRegistry>>) -> Self {
        Self { registry }
    }

    /// Dispatch one descriptor. The returned future resolves exactly once,
    /// with the result carrying `descriptor.id`.
    pub async fn dispatch(
        &self,
        descriptor: &OpDescriptor,
        previous: Option<&OpResult>,
    ) -> OpResult {
        let operative = descriptor
            .op_name()
            .and_then(|name| self.registry.read().get(name));

        let Some(operative) = operative else {
            tracing::debug!(
                id = %descriptor.id,
                op = ?descriptor.op,
                sequence = ?descriptor.sequence_number,
                "operation not understood"
            );
            return OpResult::not_understood(descriptor.id.clone());
        };

        let outcome = AssertUnwindSafe(operative.operate(&descriptor.params, previous))
            .catch_unwind()
            .await;

        let id = descriptor.id.clone();
        match outcome {
            Ok(Ok(completion)) => OpResult::from_completion(id, completion),
            Ok(Err(OperativeError::CompletionDropped)) => {
                tracing::warn!(id = %id, op = ?descriptor.op, "operative dropped its completion");
                OpResult::handler_fault(id, OperativeError::CompletionDropped.to_string())
            }
            Ok(Err(error)) => OpResult {
                id,
                status: OpStatus::Error(error.to_string()),
                value: serde_json::Value::Null,
            },
            Err(payload) => {
                let message = format!("Operative panicked: {}", panic_message(payload.as_ref()));
                tracing::error!(id = %id, op = ?descriptor.op, "{}", message);
                OpResult::handler_fault(id, message)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
