//! Step 1: mark the event as received.

use crate::event::Event;
use crate::step::{StepContext, StepError};
use serde_json::Value;

const RECEIVED_AT_KEY: &str = "received_at";
const COMPLETED_KEY: &str = "step1_completed";

/// Stamp the event with its reception time. A retried execution keeps
/// the original `received_at`.
pub fn ingest(mut event: Event, ctx: &StepContext) -> Result<Event, StepError> {
    event
        .entry(RECEIVED_AT_KEY)
        .or_insert_with(|| Value::String(ctx.timestamp()));
    event.insert(COMPLETED_KEY.into(), Value::Bool(true));
    Ok(event)
}
