//! Tolerant extraction from server JSON whose shape is not fixed.
//!
//! The backend wraps collections and results inconsistently and spells
//! per-record fields in several casings. Each logical field gets an
//! ordered alias list here; lookup takes the first non-null match.

use serde_json::Value;

use crate::core::row::{STATUS_CREATED, STATUS_UNKNOWN};

/// Wrapper keys tried, in order, when a collection payload is not a bare
/// array.
const LIST_KEYS: [&str; 3] = ["notifications", "results", "data"];

/// Identifier spellings across backend serialization conventions.
const ID_KEYS: [&str; 4] = ["id", "ID", "Id", "ID_"];

/// Status spellings.
const STATUS_KEYS: [&str; 3] = ["status", "Status", "state"];

/// Keys that may carry the created id in a create response.
const CREATED_ID_KEYS: [&str; 3] = ["result", "id", "ID"];

/// Nested id spellings inside a create response's `created` object.
const NESTED_ID_KEYS: [&str; 2] = ["id", "ID"];

/// Keys that may carry the success flag in a cancel response.
const SUCCESS_KEYS: [&str; 3] = ["result", "ok", "success"];

/// Keys that may carry a human-readable rejection message.
const ERROR_KEYS: [&str; 2] = ["error", "message"];

/// Interpret a collection payload as an ordered record list: the payload
/// itself as an array first, then each wrapper key in priority order. An
/// unrecognized shape yields no records rather than an error.
pub fn records(payload: &Value) -> &[Value] {
    if let Some(list) = payload.as_array() {
        return list;
    }
    for key in LIST_KEYS {
        if let Some(list) = payload.get(key).and_then(Value::as_array) {
            return list;
        }
    }
    &[]
}

/// Canonical row id of one raw record. String and number ids collapse to
/// the same textual form, so a backend that alternates between `7` and
/// `"7"` cannot produce duplicate rows. Records without a usable id are
/// unrepresentable and get discarded by the caller.
pub fn id(record: &Value) -> Option<String> {
    scalar_id(first_present(record, &ID_KEYS)?)
}

/// Row status of one raw record, defaulting to "unknown". A record with a
/// valid id always produces a row, recoverable status or not.
pub fn status(record: &Value) -> String {
    match first_present(record, &STATUS_KEYS) {
        Some(value) => value_text(value),
        None => STATUS_UNKNOWN.to_string(),
    }
}

/// Id reported by a create response: top-level `result`/`id`/`ID`, or the
/// nested `created` object's `id`/`ID`.
pub fn created_id(response: &Value) -> Option<String> {
    if let Some(value) = first_present(response, &CREATED_ID_KEYS) {
        return scalar_id(value);
    }
    response
        .get("created")
        .and_then(|created| first_present(created, &NESTED_ID_KEYS))
        .and_then(scalar_id)
}

/// Status reported by a create response, defaulting to "created".
pub fn created_status(response: &Value) -> String {
    match first_present(response, &STATUS_KEYS) {
        Some(value) => value_text(value),
        None => STATUS_CREATED.to_string(),
    }
}

/// Truthiness of a cancel response's success indicator. A missing
/// indicator means failure.
pub fn success_flag(response: &Value) -> bool {
    match first_present(response, &SUCCESS_KEYS) {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Best-effort rejection message: recognized error fields first, then a
/// bare string body, then a generic fallback.
pub fn error_message(response: &Value) -> String {
    if let Some(message) = first_present(response, &ERROR_KEYS) {
        return value_text(message);
    }
    if let Some(raw) = response.as_str() {
        return raw.to_string();
    }
    "unknown error".to_string()
}

/// Payload of the `result` envelope single-status queries respond with.
pub fn result_text(response: &Value) -> Option<String> {
    first_present(response, &["result"]).map(value_text)
}

/// First alias whose value is present and non-null.
fn first_present<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find(|candidate| !candidate.is_null())
}

fn scalar_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Display text of a JSON value: strings verbatim, everything else in its
/// JSON form.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
