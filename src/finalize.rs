//! Step 3: close the event once the transform has run.

use crate::event::Event;
use crate::step::{Step, StepContext, StepError};
use serde_json::Value;

const REQUIRED_KEY: &str = "step2_completed";
const COMPLETED_AT_KEY: &str = "completed_at";
const COMPLETED_KEY: &str = "step3_completed";

/// Mark a transformed event as complete.
pub fn finalize(mut event: Event, ctx: &StepContext) -> Result<Event, StepError> {
    if event.get(REQUIRED_KEY) != Some(&Value::Bool(true)) {
        return Err(StepError::OutOfOrder {
            step: Step::Finalize,
            flag: REQUIRED_KEY,
        });
    }
    event.insert(COMPLETED_KEY.into(), Value::Bool(true));
    event.insert(COMPLETED_AT_KEY.into(), Value::String(ctx.timestamp()));
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::from_value;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn ctx() -> StepContext {
        StepContext {
            now: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 5).unwrap(),
        }
    }

    #[test]
    fn completes_transformed_events() {
        let input = json!({"value": 6, "step2_completed": true});
        let output = finalize(from_value(input).unwrap(), &ctx()).unwrap();
        assert_eq!(
            Value::Object(output),
            json!({
                "value": 6,
                "step2_completed": true,
                "step3_completed": true,
                "completed_at": "2024-03-01T12:00:05+00:00"
            })
        );
    }

    #[test]
    fn refuses_untransformed_events() {
        for input in [
            json!({"value": 6}),
            json!({"step2_completed": false}),
            json!({"step2_completed": "true"}),
        ] {
            assert_eq!(
                finalize(from_value(input).unwrap(), &ctx()).unwrap_err(),
                StepError::OutOfOrder {
                    step: Step::Finalize,
                    flag: "step2_completed",
                }
            );
        }
    }
}
