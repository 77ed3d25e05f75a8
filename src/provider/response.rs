//! Provider response envelope handling
//!
//! The provider sometimes wraps the real payload under a `"json"` key and
//! sometimes returns it flat; nothing downstream may assume which.

use serde_json::Value;

/// Identifier keys checked on a dispatch response, in priority order
const CALL_ID_KEYS: [&str; 3] = ["id", "call_id", "uuid"];

/// Unwrap a possibly-enveloped response into its canonical form: an object
/// carrying the payload under `"json"` yields that payload; anything else
/// (flat objects, non-objects) passes through unchanged. Idempotent on flat
/// objects.
pub fn normalize(response: Value) -> Value {
    match response {
        Value::Object(mut map) => match map.remove("json") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Agent identifier from a normalized create-agent response (`"id"` field,
/// non-empty)
pub fn extract_agent_id(agent_data: &Value) -> Option<String> {
    identifier(agent_data.get("id")?)
}

/// Call identifier from a normalized dispatch response. The provider is not
/// consistent about the field name, so `id`, `call_id` and `uuid` are
/// checked in that order.
pub fn extract_call_id(call_data: &Value) -> Option<String> {
    let map = call_data.as_object()?;
    CALL_ID_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(identifier))
}

/// Coerce an identifier value to a non-empty string; numeric ids are
/// stringified, everything else counts as absent.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
