//! Uniform result envelope returned by every gateway operation

use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{code, message, data}` wrapper
///
/// `code = 0` is success with `data` carrying the engine's raw response body
/// (or a locally constructed document). `code = -1` covers both validation
/// failures (no network call made) and transport failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i32,
    pub message: String,
    pub data: Value,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            code: -1,
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Failure that still carries partial data (e.g. a partial bulk write)
    pub fn fail_with(message: impl Into<String>, data: Value) -> Self {
        Self {
            code: -1,
            message: message.into(),
            data,
        }
    }

    pub fn from_result(result: Result<Value, GatewayError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::fail(err.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// Parse an engine response body, falling back to a raw string
///
/// Engine bodies are JSON in practice, but `_cat`-style endpoints return
/// plain text; the envelope carries either verbatim.
pub fn body_value(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
