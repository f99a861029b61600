//! Shared fakes for integration tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use v7go::transport::{ApiRequest, Transport};
use v7go::{ApiClient, V7Error};

/// Serves list pages in call order, then empty pages forever.
pub struct PageServer {
    pages: Mutex<VecDeque<Vec<Value>>>,
    total_count: Option<i64>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl PageServer {
    pub fn new(pages: Vec<Vec<Value>>, total_count: Option<i64>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            total_count,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    /// `(offset, limit)` of every request, in order.
    pub fn cursor_log(&self) -> Vec<(usize, usize)> {
        self.requests()
            .iter()
            .map(|r| {
                let read = |key: &str| {
                    r.query_value(key)
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(usize::MAX)
                };
                (read("offset"), read("limit"))
            })
            .collect()
    }
}

#[async_trait]
impl Transport for PageServer {
    async fn send(&self, request: ApiRequest) -> Result<Value, V7Error> {
        self.requests.lock().push(request);
        let items = self.pages.lock().pop_front().unwrap_or_default();
        Ok(match self.total_count {
            Some(total) => json!({ "data": items, "metadata": { "total_count": total } }),
            None => json!({ "data": items }),
        })
    }
}

/// Client over `transport` with workspace `ws`.
pub fn client_for(transport: Arc<dyn Transport>) -> ApiClient {
    ApiClient::new(transport, Some("ws".to_string()))
}

/// Records `{"id": "<prefix>-<n>"}`.
pub fn records(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|n| json!({ "id": format!("{}-{}", prefix, n) }))
        .collect()
}
