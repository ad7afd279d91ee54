use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use shunt::{
    channel_sink, parse_group, CallbackOperative, Completer, Completion, EngineConfig,
    GroupFormat, OpResult, Operative, OperativeError, OperativeResult, Shunt, ShuntError,
    ShuntResult, SinkEvent,
};

const DEMO_GROUP: &str = r#"
[
  [
    { "id": "sum-a", "op": "addArrayToRunningSum", "params": [3, 4, 5, 10] },
    { "id": "mul-a", "op": "multiplyArrayAndRunningSum", "params": [1000, 0.5] },
    { "id": "sum-a2", "op": "addArrayToRunningSum", "params": [800, -45] }
  ],
  [
    { "id": "later-b", "op": "giveBackANumberLater", "params": { "number": 7, "delay": 50 } },
    { "id": "unknown-b", "op": "doesNotExist" },
    { "id": "sum-b", "op": "addArrayToRunningSum", "params": [1, 2] }
  ],
  []
]
"#;

/// Adds the numbers in `params` to the previous op's value.
struct AddToPrevious;

/// Multiplies the numbers in `params` with the previous op's value.
struct MultiplyWithPrevious;

fn numbers(params: &Value) -> OperativeResult<Vec<f64>> {
    let items = params
        .as_array()
        .ok_or_else(|| OperativeError::InvalidParams("expected an array of numbers".into()))?;
    items
        .iter()
        .map(|item| {
            item.as_f64()
                .ok_or_else(|| OperativeError::InvalidParams(format!("not a number: {}", item)))
        })
        .collect()
}

fn previous_number(previous: Option<&OpResult>) -> Option<f64> {
    previous.and_then(|result| result.value.as_f64())
}

#[async_trait]
impl Operative for AddToPrevious {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        let sum: f64 = numbers(params)?.iter().sum();
        let total = sum + previous_number(previous).unwrap_or(0.0);
        Ok(Completion::tagged("Added", json!(total)))
    }
}

#[async_trait]
impl Operative for MultiplyWithPrevious {
    async fn operate(
        &self,
        params: &Value,
        previous: Option<&OpResult>,
    ) -> OperativeResult<Completion> {
        let product: f64 = numbers(params)?.iter().product();
        let total = product * previous_number(previous).unwrap_or(1.0);
        Ok(Completion::tagged("Multiplied", json!(total)))
    }
}

fn load_group(path: Option<&str>) -> ShuntResult<shunt::SequenceGroup> {
    let Some(path) = path else {
        return parse_group(DEMO_GROUP, GroupFormat::Json);
    };
    let format = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(GroupFormat::from_extension)
        .ok_or_else(|| ShuntError::GroupParseError(format!("unknown format: {}", path)))?;
    let content = std::fs::read_to_string(path)?;
    parse_group(&content, format)
}

#[tokio::main]
async fn main() -> ShuntResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let group = load_group(args.get(1).map(String::as_str))?;
    let config = match std::env::var("SHUNT_CONFIG") {
        Ok(path) => EngineConfig::from_yaml(&std::fs::read_to_string(path)?)?,
        Err(_) => EngineConfig::default(),
    };

    let shunt = Shunt::builder().config(config).build();
    shunt
        .add_operative("addArrayToRunningSum", AddToPrevious)
        .add_operative("multiplyArrayAndRunningSum", MultiplyWithPrevious)
        .add_operative(
            "giveBackANumberLater",
            CallbackOperative::new(|params: Value, done: Completer, _prev| {
                let delay = params["delay"].as_u64().unwrap_or(0);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    done.complete("Giving back", params["number"].clone());
                });
            }),
        );

    println!("=== Shunt ({} sequences) ===", group.len());

    let (sink, mut rx) = channel_sink();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                SinkEvent::Result(result) => match serde_json::to_string(&result) {
                    Ok(line) => println!("{}", line),
                    Err(e) => eprintln!("unprintable result: {}", e),
                },
                SinkEvent::End => {
                    println!("=== end of stream ===");
                    break;
                }
            }
        }
    });

    let report = shunt.run_sequence_group(group, Arc::new(sink)).await;
    let _ = printer.await;
    println!(
        "{} results from {} sequences",
        report.results_written,
        report.sequences.len()
    );
    Ok(())
}
