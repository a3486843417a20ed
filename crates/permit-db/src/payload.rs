//! Request payloads for the remote data service.
//!
//! Wire shape: `{ database, query?, procedure?, parameters }` with exactly
//! one of `query` / `procedure` present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DataError;

pub type Params = Map<String, Value>;

/// Which upstream endpoint a payload is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Query,
    Procedure,
}

impl Target {
    pub fn path(self) -> &'static str {
        match self {
            Target::Query => "/query",
            Target::Procedure => "/procedure",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure: Option<String>,
    #[serde(default)]
    pub parameters: Params,
}

impl Payload {
    pub fn query(database: &str, text: &str, parameters: Params) -> Self {
        Self {
            database: Some(database.to_string()),
            query: Some(text.to_string()),
            procedure: None,
            parameters,
        }
    }

    pub fn procedure(database: &str, name: &str, parameters: Params) -> Self {
        Self {
            database: Some(database.to_string()),
            query: None,
            procedure: Some(name.to_string()),
            parameters,
        }
    }

    /// Validate the payload and pick its endpoint.
    ///
    /// Empty strings count as absent.
    pub fn target(&self) -> Result<Target, DataError> {
        if is_blank(&self.database) {
            return Err(DataError::InvalidPayload("Database name is required".into()));
        }
        match (is_blank(&self.query), is_blank(&self.procedure)) {
            (false, true) => Ok(Target::Query),
            (true, false) => Ok(Target::Procedure),
            (true, true) => Err(DataError::InvalidPayload(
                "Either query or procedure is required".into(),
            )),
            (false, false) => Err(DataError::InvalidPayload(
                "Only one of query or procedure may be given".into(),
            )),
        }
    }

    /// A short label for logs: the procedure name or the first query line.
    pub fn label(&self) -> &str {
        self.procedure
            .as_deref()
            .or_else(|| self.query.as_deref().and_then(|q| q.trim().lines().next()))
            .unwrap_or("")
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(|s| s.trim().is_empty())
}

/// Build a parameter map from a JSON object literal.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}

/// Insert an optional text parameter only when it has content.
///
/// The data service cannot take `null` for optional procedure arguments,
/// so absent values are omitted instead.
pub fn insert_text(params: &mut Params, key: &str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        params.insert(key.to_string(), Value::String(v.to_string()));
    }
}

/// Cache key for a read: endpoint plus the serialized payload.
///
/// `serde_json::Map` keeps keys sorted, so equal payloads produce equal keys.
pub fn cache_key(target: Target, payload: &Payload) -> String {
    let body = serde_json::to_string(payload).unwrap_or_default();
    format!("{}:{body}", target.path())
}
