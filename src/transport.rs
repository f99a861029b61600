//! Transport
//!
//! Issues exactly one authenticated HTTP request per call and returns parsed JSON
//! or a classified [`V7Error`]. Retrying is a policy decision left to callers.

use crate::config::ClientConfig;
use crate::error::V7Error;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

pub const API_KEY_HEADER: &str = "X-API-Key";

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One request against the API. `path` is either absolute (`http...`) or
/// relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value of a query parameter, if set.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The network boundary consumed by the SDK core.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value, V7Error>;
}

/// `reqwest`-backed transport authenticating with the `X-API-Key` header.
pub struct HttpTransport {
    client: Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, V7Error> {
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| V7Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url, path)
        }
    }

    fn map_send_error(&self, error: reqwest::Error) -> V7Error {
        if error.is_timeout() {
            V7Error::Transport(format!(
                "Request timed out after {} seconds",
                self.config.request_timeout_secs
            ))
        } else if error.is_connect() {
            V7Error::Transport(format!("Connection error: {}", error))
        } else {
            V7Error::Transport(format!("HTTP error: {}", error))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, V7Error> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            V7Error::api(0, "V7_GO_API_KEY environment variable not set", None)
        })?;

        let url = self.url(&request.path);
        debug!(method = %request.method, path = %request.path, "Sending request");

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(API_KEY_HEADER, api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(method = %request.method, path = %request.path, status = status.as_u16(), "Response received");

        if !status.is_success() {
            return Err(api_error_from_body(status, &text));
        }
        if text.trim().is_empty() {
            return Ok(json!({ "success": true }));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Classify a non-2xx response.
///
/// Accepts both `{"error": "message"}` and `{"error": {"message": "..."}}`; the
/// whole parsed body is kept as details. A non-JSON body yields the status line.
pub fn api_error_from_body(status: StatusCode, body: &str) -> V7Error {
    let status_line = format!(
        "HTTP Error {}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    );
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return V7Error::api(status.as_u16(), status_line, None),
    };
    let message = match parsed.get("error") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Object(error)) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(status_line),
        _ => status_line,
    };
    V7Error::api(status.as_u16(), message, Some(parsed))
}
