//! Interpreting data-service responses: error bodies and row shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DataError;

/// A non-2xx answer reduced to something a caller can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamFailure {
    pub status: u16,
    /// Human-readable message.
    pub message: String,
    /// The raw body, pretty-printed when it was JSON.
    pub details: String,
}

impl From<UpstreamFailure> for DataError {
    fn from(f: UpstreamFailure) -> Self {
        DataError::Upstream {
            status: f.status,
            message: f.message,
            details: f.details,
        }
    }
}

/// Extract a message from an error body, looking at `error`, then
/// `message`, then `details`; falling back to the raw text and finally to
/// `HTTP <status>`.
pub fn normalize_error(status: u16, body: &str) -> UpstreamFailure {
    let fallback = || {
        if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            body.to_string()
        }
    };

    match serde_json::from_str::<Value>(body) {
        Ok(json) => {
            let message = ["error", "message", "details"]
                .iter()
                .find_map(|field| json.get(field).and_then(message_text))
                .unwrap_or_else(fallback);
            let details = serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string());
            UpstreamFailure {
                status,
                message,
                details,
            }
        }
        Err(_) => UpstreamFailure {
            status,
            message: fallback(),
            details: body.to_string(),
        },
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parse a 2xx body. An empty body reads as `null`.
pub fn parse_success(body: &str) -> Result<Value, DataError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| DataError::Decode(format!("invalid JSON body: {e}")))
}

/// Flatten the shapes the data service answers with into a list of rows.
///
/// Accepted: bare array, `{data}`, `{recordset}`, `{recordsets}` (first
/// set), a single object (one row), and `null` (no rows).
pub fn rows(value: Value) -> Vec<Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return rows(data);
            }
            if let Some(set) = map.remove("recordset") {
                return rows(set);
            }
            if let Some(Value::Array(sets)) = map.remove("recordsets") {
                return sets.into_iter().next().map(rows).unwrap_or_default();
            }
            vec![Value::Object(map)]
        }
        _ => Vec::new(),
    }
}

/// Decode every row into `R`.
pub fn decode_rows<R: DeserializeOwned>(value: Value) -> Result<Vec<R>, DataError> {
    rows(value)
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| DataError::Decode(e.to_string())))
        .collect()
}
