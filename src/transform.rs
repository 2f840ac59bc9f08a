//! Step 2: double the numeric `value` and upper-case `name`.

use crate::event::{kind, Event};
use crate::step::StepError;
use serde_json::{Number, Value};
use tracing::debug;

const VALUE_KEY: &str = "value";
const NAME_KEY: &str = "name";
const TRANSFORMED_NAME_KEY: &str = "transformed_name";
const COMPLETED_KEY: &str = "step2_completed";

/// Double a number, keeping integers integral.
fn double(number: &Number) -> Result<Number, StepError> {
    let doubled = if number.is_f64() {
        number.as_f64().and_then(|n| Number::from_f64(n * 2.0))
    } else {
        // Large positive values only fit once doubled as u64.
        number
            .as_i64()
            .and_then(|n| n.checked_mul(2))
            .map(Number::from)
            .or_else(|| {
                number
                    .as_u64()
                    .and_then(|n| n.checked_mul(2))
                    .map(Number::from)
            })
    };
    doubled.ok_or(StepError::Overflow { key: VALUE_KEY })
}

/// Merge the transformed fields into the event. A missing `value`
/// counts as `0` and a missing `name` as the empty string; every
/// other key is passed through.
///
/// Integers are doubled exactly as long as the result fits in `i64`
/// or `u64`; beyond that the step fails with `Overflow`.
pub fn transform(mut event: Event) -> Result<Event, StepError> {
    let value = match event.get(VALUE_KEY) {
        None => Number::from(0),
        Some(Value::Number(n)) => double(n)?,
        Some(other) => {
            return Err(StepError::InvalidField {
                key: VALUE_KEY,
                expected: "a number",
                found: kind(other),
            })
        }
    };
    let transformed_name = match event.get(NAME_KEY) {
        None => String::new(),
        Some(Value::String(s)) => s.to_uppercase(),
        Some(other) => {
            return Err(StepError::InvalidField {
                key: NAME_KEY,
                expected: "a string",
                found: kind(other),
            })
        }
    };
    debug!(%value, %transformed_name, "Transformed fields");

    event.insert(COMPLETED_KEY.into(), Value::Bool(true));
    event.insert(VALUE_KEY.into(), Value::Number(value));
    event.insert(TRANSFORMED_NAME_KEY.into(), Value::String(transformed_name));
    Ok(event)
}
