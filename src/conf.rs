//! Defines configuration as read from the environment.

use crate::step::Step;
use serde::Deserialize;

/// Each deployed function runs exactly one step of the pipeline,
/// optionally reshaping its input and output with jq programs. The
/// configuration must be given as environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// The step this function runs, by name (`step2_transform`) or
    /// alias (`transform`).
    pub step: Step,

    /// A jq program applied to the incoming event before the step
    /// runs. It must produce a JSON object. Omitting it passes the
    /// event through untouched.
    #[serde(default)]
    pub input_filter: Option<String>,

    /// A jq program applied to the event produced by the step, right
    /// before it's returned to the orchestrator.
    #[serde(default)]
    pub output_filter: Option<String>,
}
