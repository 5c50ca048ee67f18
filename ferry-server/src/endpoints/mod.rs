//! HTTP handlers
//!
//! Handlers read the raw body and parse it themselves so a malformed request
//! becomes a failure envelope instead of an axum rejection; callers always
//! get HTTP 200 with `{code, message, data}`.

pub mod admin;
pub mod data;

use axum::body::Bytes;
use ferry::Envelope;
use serde_json::Value;

/// Parse a request body; an empty body is an empty object
pub(crate) fn parse_body(body: &Bytes) -> Result<Value, Envelope> {
    if body.is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(body)
        .map_err(|e| Envelope::fail(format!("invalid request body: {e}")))
}

/// Pull a required string field out of a request body
pub(crate) fn required_str<'a>(body: &'a Value, key: &str) -> Result<&'a str, Envelope> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Envelope::fail(format!("empty {key}")))
}
