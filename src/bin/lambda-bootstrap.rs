use anyhow::{anyhow, Result};
use lambda_runtime::{run, service_fn, LambdaEvent};
use serde_json::Value;
use sfn_steps::app;
use sfn_steps::step::StepContext;
use tracing::instrument;

/// Run the configured step over the event handed over by the
/// orchestrator.
#[instrument(skip_all, fields(request_id = %event.context.request_id))]
async fn function_handler(event: LambdaEvent<Value>) -> Result<Value> {
    app::current().handle(event.payload, &StepContext::now())
}

/// Run an AWS Lambda function that applies a single pipeline step to
/// each invocation's event and returns the merged event.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();
    app::init()?;

    run(service_fn(function_handler))
        .await
        .map_err(|e| anyhow!("{:?}", e))
}
