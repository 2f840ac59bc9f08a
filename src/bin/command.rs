use anyhow::{Context, Result};
use serde_json::Value;
use sfn_steps::app;
use sfn_steps::step::StepContext;
use std::env::args;
use tokio::io::{stdin, AsyncReadExt};

/// Run steps locally over an event read from stdin, printing the
/// resulting event. Without arguments the step configured in the
/// environment runs; otherwise the named steps run in order.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let steps = app::parse_steps(args().skip(1))?;

    let mut raw = String::new();
    stdin()
        .read_to_string(&mut raw)
        .await
        .context("Failed to read the event from stdin")?;
    let payload: Value = serde_json::from_str(&raw).context("The event is not valid JSON")?;

    let output = app::run_local(&steps, payload, &StepContext::now())?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
