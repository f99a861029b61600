//! In-memory transport fakes for unit tests.

use crate::error::V7Error;
use crate::transport::{ApiRequest, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;

/// Replays canned responses in order and records every request.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, V7Error>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value, V7Error>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, V7Error> {
        self.requests.lock().push(request.clone());
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(V7Error::Transport(format!(
                "no scripted response for {} {}",
                request.method, request.path
            )))
        })
    }
}

/// List response with one `{"id": ...}` record per id.
pub fn list_page(ids: &[&str], total_count: Option<i64>) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    match total_count {
        Some(total) => json!({ "data": data, "metadata": { "total_count": total } }),
        None => json!({ "data": data }),
    }
}

pub fn duplicate_name_error() -> V7Error {
    V7Error::api(
        422,
        "Validation failed",
        Some(json!({ "errors": { "name": ["duplicate_name"] } })),
    )
}
