//! Defines the event passed between steps: an arbitrary JSON object
//! whose shape is whatever the previous step left behind.

use anyhow::{anyhow, Result};
use serde_json::{Map, Value};

/// A step's input and output.
pub type Event = Map<String, Value>;

/// Name the JSON kind of a value, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Unwrap a raw payload into an event. Anything other than a JSON
/// object is rejected.
pub fn from_value(value: Value) -> Result<Event> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("event must be an object, got {}", kind(&other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn objects_become_events() {
        let event = from_value(json!({"value": 1})).unwrap();
        assert_eq!(event.get("value"), Some(&json!(1)));
    }

    #[test]
    fn non_objects_are_rejected() {
        let err = from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "event must be an object, got an array");
        assert!(from_value(Value::Null).is_err());
        assert!(from_value(json!("value")).is_err());
    }
}
