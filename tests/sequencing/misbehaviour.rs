use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use shunt::{
    CallbackOperative, CollectingSink, Completer, Completion, OpResult, OpStatus, Operative,
    OperativeResult,
};

use crate::helpers::{op, standard_shunt, value_f64, with_timeout};

const LIMIT: Duration = Duration::from_secs(5);

struct PanicsWhileAwaiting;

#[async_trait]
impl Operative for PanicsWhileAwaiting {
    async fn operate(
        &self,
        _params: &Value,
        _previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        tokio::time::sleep(Duration::from_millis(1)).await;
        panic!("lost the plot");
    }
}

#[tokio::test]
async fn panicking_operative_becomes_handler_fault() {
    let shunt = standard_shunt();
    shunt
        .add_operative("panicNow", CallbackOperative::new(|_p, _done: Completer, _prev| {
            panic!("immediate");
        }))
        .add_operative("panicLater", PanicsWhileAwaiting);
    let sink = Arc::new(CollectingSink::new());
    let group = vec![vec![
        op("p1", "panicNow", json!(null)),
        op("p2", "panicLater", json!(null)),
        op("after", "addArrayToRunningSum", json!([4])),
    ]];

    with_timeout("panics", LIMIT, shunt.run_sequence_group(group, sink.clone())).await;

    let results = sink.results();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].status,
        OpStatus::HandlerFault("Operative panicked: immediate".into())
    );
    assert_eq!(
        results[1].status,
        OpStatus::HandlerFault("Operative panicked: lost the plot".into())
    );
    assert_eq!(value_f64(&results[2]), 4.0);
    assert_eq!(sink.end_count(), 1);
}

#[tokio::test]
async fn dropped_completion_becomes_handler_fault() {
    let shunt = standard_shunt();
    shunt
        .add_operative("forget", CallbackOperative::new(|_p, done: Completer, _prev| {
            drop(done);
        }))
        .add_operative(
            "panicInTask",
            CallbackOperative::new(|_p, done: Completer, _prev| {
                tokio::spawn(async move {
                    let _held = done;
                    panic!("background task died");
                });
            }),
        );
    let sink = Arc::new(CollectingSink::new());
    let group = vec![vec![
        op("f", "forget", json!(null)),
        op("t", "panicInTask", json!(null)),
    ]];

    with_timeout("dropped", LIMIT, shunt.run_sequence_group(group, sink.clone())).await;

    let results = sink.results();
    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(
            matches!(result.status, OpStatus::HandlerFault(_)),
            "unexpected status {:?}",
            result.status
        );
        assert!(result.value.is_null());
    }
}

#[tokio::test]
async fn completer_is_consumed_on_first_completion() {
    let shunt = standard_shunt();
    shunt.add_operative(
        "once",
        CallbackOperative::new(|params, done: Completer, _prev| {
            done.complete("First", params);
        }),
    );
    let sink = Arc::new(CollectingSink::new());
    let group = vec![vec![op("o", "once", json!(1)), op("o2", "once", json!(2))]];

    with_timeout("once", LIMIT, shunt.run_sequence_group(group, sink.clone())).await;

    let statuses: Vec<OpStatus> = sink.results().into_iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![OpStatus::from("First"), OpStatus::from("First")]);
}

#[tokio::test]
async fn operative_that_never_completes_stalls_its_group() {
    let shunt = Arc::new(standard_shunt());
    shunt.add_operative(
        "hang",
        CallbackOperative::new(|_p, done: Completer, _prev| {
            tokio::spawn(async move {
                let _held = done;
                std::future::pending::<()>().await;
            });
        }),
    );
    let sink = Arc::new(CollectingSink::new());
    let group = vec![
        vec![op("h", "hang", json!(null))],
        vec![op("ok", "addArrayToRunningSum", json!([1]))],
    ];

    let engine = shunt.clone();
    let run_sink = sink.clone();
    let outcome = tokio::time::timeout(Duration::from_millis(200), async move {
        engine.run_sequence_group(group, run_sink).await
    })
    .await;

    assert!(outcome.is_err(), "group should not finish");
    assert!(!sink.is_ended());
    let ids: Vec<Value> = sink.results().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![json!("ok")]);
}
