//! Defines the pipeline steps and the dispatch between them.

use crate::event::Event;
use crate::{finalize, ingest, transform};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single handler in the pipeline. The orchestrator decides the
/// order; each deployed function runs one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Step {
    #[serde(rename = "step1_ingest", alias = "ingest")]
    Ingest,
    #[serde(rename = "step2_transform", alias = "transform")]
    Transform,
    #[serde(rename = "step3_finalize", alias = "finalize")]
    Finalize,
}

impl Step {
    /// All steps, in pipeline order.
    pub const ALL: [Step; 3] = [Step::Ingest, Step::Transform, Step::Finalize];

    /// The canonical name of the step.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Ingest => "step1_ingest",
            Step::Transform => "step2_transform",
            Step::Finalize => "step3_finalize",
        }
    }

    fn alias(&self) -> &'static str {
        match self {
            Step::Ingest => "ingest",
            Step::Transform => "transform",
            Step::Finalize => "finalize",
        }
    }

    /// Run the step over an event.
    pub fn apply(&self, event: Event, ctx: &StepContext) -> Result<Event, StepError> {
        match self {
            Step::Ingest => ingest::ingest(event, ctx),
            Step::Transform => transform::transform(event),
            Step::Finalize => finalize::finalize(event, ctx),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .into_iter()
            .find(|step| step.name() == s || step.alias() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown step {:?}", s))
    }
}

/// Invocation-wide inputs that aren't part of the event.
#[derive(Debug, Clone)]
pub struct StepContext {
    /// The instant the invocation started.
    pub now: DateTime<Utc>,
}

impl StepContext {
    /// A context whose clock reads the current instant.
    pub fn now() -> Self {
        StepContext { now: Utc::now() }
    }

    /// The invocation instant, formatted for inclusion in events.
    pub fn timestamp(&self) -> String {
        self.now.to_rfc3339()
    }
}

/// Ways in which a step can reject an event.
#[derive(Debug, Error, PartialEq)]
pub enum StepError {
    #[error("field {key:?} must be {expected}, got {found}")]
    InvalidField {
        key: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("doubling field {key:?} overflows")]
    Overflow { key: &'static str },

    #[error("{step} requires {flag:?}, which an earlier step sets")]
    OutOfOrder { step: Step, flag: &'static str },
}

/// Run steps one after the other, feeding each the previous output.
pub fn run_chain(steps: &[Step], event: Event, ctx: &StepContext) -> Result<Event, StepError> {
    steps
        .iter()
        .try_fold(event, |event, step| step.apply(event, ctx))
}
