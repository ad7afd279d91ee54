use async_trait::async_trait;
use serde_json::Value;

use crate::domain::model::{Completion, OpResult};
use crate::error::OperativeResult;

/// Trait for a named unit of domain work. Registered under a name and
/// resolved by the dispatcher.
///
/// `previous` is the result of the preceding op in the same sequence, or
/// `None` for the first op. An `Err` is recorded as the result's status and
/// does not stop the sequence unless the engine runs with
/// [`ErrorPolicy::Abort`](crate::core::config::ErrorPolicy::Abort).
#[async_trait]
pub trait Operative: Send + Sync {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion>;
}
