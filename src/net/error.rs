//! API error taxonomy and form-error normalization.
//!
//! ERROR HANDLING
//! ==============
//! Every failed request surfaces as an `ApiError` carrying the HTTP
//! status and parsed body when the server answered at all. Mutating
//! store actions additionally flatten the error into `FormErrors` for
//! form rendering; only a 422 with an `errors` payload produces
//! field-level messages, everything else collapses to one global line.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error produced by the HTTP client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure; no HTTP response was produced.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String, data: Value },

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the server produced a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 422: the request was understood but failed validation.
    pub fn is_validation(&self) -> bool {
        self.status() == Some(422)
    }

    /// 401: the session token is missing or no longer honored.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// 5xx.
    pub fn is_server(&self) -> bool {
        self.status().is_some_and(|s| s >= 500)
    }
}

/// Field-keyed validation messages plus an optional global message,
/// consumed by UI forms. Overwritten at the start of every mutating
/// action and on every failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormErrors {
    pub global: Option<String>,
    pub fields: HashMap<String, Vec<String>>,
}

impl FormErrors {
    /// Flatten a failed request into form errors.
    ///
    /// A 422 whose payload carries an object `errors` field supplies
    /// the field map; any other failure becomes a global message.
    pub fn from_api_error(err: &ApiError) -> Self {
        if let ApiError::Http { status: 422, data, .. } = err {
            if let Some(map) = data.get("errors").and_then(Value::as_object) {
                let fields = map
                    .iter()
                    .map(|(name, raw)| (name.clone(), field_messages(raw)))
                    .collect();
                return Self { global: None, fields };
            }
        }

        let message = match err {
            ApiError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self { global: Some(message), fields: HashMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.fields.is_empty()
    }

    /// Messages recorded for one form field.
    pub fn field(&self, name: &str) -> Option<&[String]> {
        self.fields.get(name).map(Vec::as_slice)
    }
}

/// Servers send field errors as an array of strings; tolerate a bare
/// string as well.
fn field_messages(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}
