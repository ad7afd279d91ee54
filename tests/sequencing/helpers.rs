#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use shunt::{
    CallbackOperative, Completer, Completion, OpDescriptor, OpResult, Operative, OperativeError,
    OperativeResult, Shunt,
};

pub async fn with_timeout<F, T>(label: &str, duration: Duration, f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(duration, f)
        .await
        .unwrap_or_else(|_| panic!("'{}' timed out after {:?}", label, duration))
}

pub fn op(id: &str, name: &str, params: Value) -> OpDescriptor {
    OpDescriptor::new(id, name, params)
}

pub fn value_f64(result: &OpResult) -> f64 {
    result
        .value
        .as_f64()
        .unwrap_or_else(|| panic!("result {} has no numeric value", result.id))
}

fn numbers(params: &Value) -> OperativeResult<Vec<f64>> {
    params
        .as_array()
        .ok_or_else(|| OperativeError::InvalidParams("expected an array".into()))?
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| OperativeError::InvalidParams(format!("not a number: {}", v)))
        })
        .collect()
}

fn previous_number(previous: Option<&OpResult>) -> Option<f64> {
    previous.and_then(|p| p.value.as_f64())
}

/// Sums `params` onto the previous op's value.
pub struct AddArrayToRunningSum;

#[async_trait]
impl Operative for AddArrayToRunningSum {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        let sum: f64 = numbers(params)?.iter().sum();
        Ok(Completion::tagged(
            "Added",
            json!(sum + previous_number(previous).unwrap_or(0.0)),
        ))
    }
}

/// Multiplies `params` with the previous op's value.
pub struct MultiplyArrayAndRunningSum;

#[async_trait]
impl Operative for MultiplyArrayAndRunningSum {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        let product: f64 = numbers(params)?.iter().product();
        Ok(Completion::tagged(
            "Added",
            json!(product * previous_number(previous).unwrap_or(1.0)),
        ))
    }
}

/// Records every `previous` it is handed, keyed by the descriptor params.
#[derive(Default)]
pub struct PreviousRecorder {
    pub seen: Mutex<Vec<(Value, Option<OpResult>)>>,
}

#[async_trait]
impl Operative for PreviousRecorder {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        self.seen.lock().push((params.clone(), previous.cloned()));
        Ok(Completion::tagged("Recorded", params.clone()))
    }
}

/// Counts invocations.
#[derive(Default)]
pub struct CallCounter {
    pub calls: AtomicUsize,
}

impl CallCounter {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Operative for CallCounter {
    async fn operate(
        &self,
        _params: &Value,
        _previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Completion::success(Value::Null))
    }
}

/// Engine with the standard test operatives registered.
pub fn standard_shunt() -> Shunt {
    let shunt = Shunt::new();
    register_standard(&shunt);
    shunt
}

pub fn register_standard(shunt: &Shunt) {
    shunt
        .add_operative("addArrayToRunningSum", AddArrayToRunningSum)
        .add_operative("multiplyArrayAndRunningSum", MultiplyArrayAndRunningSum)
        .add_operative(
            "giveBackANumberLater",
            CallbackOperative::new(|params: Value, done: Completer, _prev| {
                let delay = params["delay"].as_u64().unwrap_or(0);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    done.complete("Giving back", params["number"].clone());
                });
            }),
        )
        .add_operative(
            "failureOp",
            CallbackOperative::new(|_params, done: Completer, _prev| {
                done.complete("Failed", Value::Null);
            }),
        )
        .add_operative(
            "pickKeyFromDict",
            CallbackOperative::new(|params: Value, done: Completer, _prev| {
                let key = params["key"].as_str().unwrap_or_default().to_string();
                done.complete("Got", params["dict"][key.as_str()].clone());
            }),
        );
}

pub fn shared<T: Operative + 'static>(operative: T) -> Arc<T> {
    Arc::new(operative)
}
