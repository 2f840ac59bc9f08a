//! Defines the read-only application state: the configured step and
//! its compiled filters.

use crate::conf::Settings;
use crate::event;
use crate::jq;
use crate::step::{run_chain, Step, StepContext};
use anyhow::{anyhow, Context, Result};
use envy::from_env;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing::{info, instrument};

/// An App is an initialized application state, derived from
/// settings. Filters are compiled once and reused across
/// invocations.
pub struct App {
    /// The original settings.
    pub settings: Settings,

    /// The filter applied to incoming events.
    pub input_filter: Option<jq::Filter>,

    /// The filter applied to outgoing events.
    pub output_filter: Option<jq::Filter>,
}

impl App {
    /// Initialize an App instance given a settings struct. Consumes
    /// the settings struct.
    pub fn new(settings: Settings) -> Result<Self> {
        let input_filter = settings
            .input_filter
            .as_deref()
            .map(jq::compile)
            .transpose()
            .context("Invalid input filter")?;
        let output_filter = settings
            .output_filter
            .as_deref()
            .map(jq::compile)
            .transpose()
            .context("Invalid output filter")?;
        Ok(App {
            settings,
            input_filter,
            output_filter,
        })
    }

    /// The step this app runs.
    pub fn step(&self) -> Step {
        self.settings.step
    }

    /// Handle a single invocation payload, producing the payload
    /// handed to the next step.
    #[instrument(skip_all, fields(step = %self.step()))]
    pub fn handle(&self, payload: Value, ctx: &StepContext) -> Result<Value> {
        let input = jq::reshape(self.input_filter.as_ref(), payload, "input")?;
        let event = event::from_value(input)?;
        let output = self
            .step()
            .apply(event, ctx)
            .with_context(|| format!("{} rejected the event", self.step()))?;
        info!(keys = output.len(), "Step completed");
        jq::reshape(self.output_filter.as_ref(), Value::Object(output), "output")
    }
}

/// Global App instance.
static CURRENT: OnceCell<App> = OnceCell::new();

/// Initialize the global App instance.
pub fn init() -> Result<()> {
    let settings = from_env().context("Failed to read settings from the environment")?;
    let app = App::new(settings)?;
    CURRENT
        .set(app)
        .map_err(|_| anyhow!("app::CURRENT was already initialized"))
}

/// Get the current App instance, or panic if it hasn't been
/// initialized.
pub fn current() -> &'static App {
    CURRENT.get().expect("app is not initialized")
}

/// Parse step names given on the command line.
pub fn parse_steps<I>(names: I) -> Result<Vec<Step>>
where
    I: IntoIterator<Item = String>,
{
    names.into_iter().map(|name| name.parse::<Step>()).collect()
}

/// Run a payload outside Lambda. Named steps run in order without
/// reading settings; with no steps, the app configured in the
/// environment handles the payload.
pub fn run_local(steps: &[Step], payload: Value, ctx: &StepContext) -> Result<Value> {
    if steps.is_empty() {
        init()?;
        return current().handle(payload, ctx);
    }
    let event = event::from_value(payload)?;
    let output = run_chain(steps, event, ctx)
        .with_context(|| format!("Failed to run steps {:?}", steps))?;
    Ok(Value::Object(output))
}
