//! Error types for the V7 Go client.

use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors surfaced by the transport, SDK and CLI layers.
#[derive(Debug, Error)]
pub enum V7Error {
    /// Connection failure, request timeout or an unparseable response body.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response. `status` is 0 when the failure happened before any
    /// HTTP exchange (e.g. missing credentials).
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// Locally detected bad input; never sent to the network.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<Value>,
    },

    /// A polled operation did not reach a terminal state before its deadline.
    #[error("{message}")]
    Timeout {
        message: String,
        last_status: String,
        resource: Value,
    },

    /// A polled operation reported a failure-terminal status.
    #[error("{message}")]
    OperationFailed { message: String, resource: Value },

    /// The caller cancelled a wait before it resolved.
    #[error("Wait cancelled (status: {last_status})")]
    Cancelled { last_status: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl V7Error {
    pub fn api(status: u16, message: impl Into<String>, details: Option<Value>) -> Self {
        V7Error::Api {
            status,
            message: message.into(),
            details,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        V7Error::Validation {
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status code, if the error came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            V7Error::Api { status, .. } if *status != 0 => Some(*status),
            _ => None,
        }
    }

    /// Structured detail attached to the error, if any.
    pub fn details(&self) -> Option<Value> {
        match self {
            V7Error::Api { details, .. } | V7Error::Validation { details, .. } => details.clone(),
            V7Error::Timeout { resource, .. } | V7Error::OperationFailed { resource, .. } => {
                Some(json!({ "resource": resource }))
            }
            _ => None,
        }
    }

    /// Render as the CLI's structured error object.
    ///
    /// `details` is omitted when absent or empty and `status` when there was
    /// no HTTP exchange.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("error".to_string(), Value::String(self.to_string()));
        if let Some(details) = self.details().filter(|d| !is_empty_detail(d)) {
            out.insert("details".to_string(), details);
        }
        if let Some(status) = self.status() {
            out.insert("status".to_string(), json!(status));
        }
        Value::Object(out)
    }
}

fn is_empty_detail(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl From<config::ConfigError> for V7Error {
    fn from(err: config::ConfigError) -> Self {
        V7Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for V7Error {
    fn from(err: serde_json::Error) -> Self {
        V7Error::Transport(format!("Invalid JSON response: {}", err))
    }
}
