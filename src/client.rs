//! Low-level API client: HTTP verbs and workspace-scoped helpers over a [`Transport`].

use crate::config::ClientConfig;
use crate::error::V7Error;
use crate::pagination::Paginator;
use crate::transport::{ApiRequest, HttpTransport, Transport};
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Thin, cloneable handle shared by every domain operation.
///
/// Holds only read-only state: the transport and the default workspace.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    workspace_id: Option<String>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, workspace_id: Option<String>) -> Self {
        Self {
            transport,
            workspace_id,
        }
    }

    /// Build an HTTP-backed client from resolved configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, V7Error> {
        let workspace_id = config.workspace_id.clone();
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), workspace_id))
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.workspace_id.as_deref()
    }

    /// Same transport, different default workspace.
    pub fn with_workspace(&self, workspace_id: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            workspace_id: Some(workspace_id.into()),
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<Value, V7Error> {
        self.transport.send(request).await
    }

    pub async fn get(&self, path: &str) -> Result<Value, V7Error> {
        self.send(ApiRequest::new(Method::GET, path)).await
    }

    /// GET with query parameters; `None` values are dropped.
    pub async fn get_with_params(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Value, V7Error> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (key, value) in params {
            if let Some(value) = value {
                request = request.with_query(*key, value);
            }
        }
        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, V7Error> {
        self.send(with_optional_body(ApiRequest::new(Method::POST, path), body))
            .await
    }

    pub async fn put(&self, path: &str, body: Option<Value>) -> Result<Value, V7Error> {
        self.send(with_optional_body(ApiRequest::new(Method::PUT, path), body))
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, V7Error> {
        self.send(ApiRequest::new(Method::DELETE, path)).await
    }

    /// `/api/workspaces/{id}` for the default workspace.
    pub fn workspace_path(&self) -> Result<String, V7Error> {
        let workspace_id = self.workspace_id.as_deref().ok_or_else(|| {
            V7Error::api(
                0,
                "Workspace ID required. Set V7_GO_WORKSPACE_ID env var or use --workspace flag",
                None,
            )
        })?;
        Ok(format!("/api/workspaces/{}", workspace_id))
    }

    fn scoped(&self, path: &str) -> Result<String, V7Error> {
        Ok(format!("{}{}", self.workspace_path()?, path))
    }

    pub async fn workspace_get(&self, path: &str) -> Result<Value, V7Error> {
        let path = self.scoped(path)?;
        self.get(&path).await
    }

    pub async fn workspace_post(&self, path: &str, body: Option<Value>) -> Result<Value, V7Error> {
        let path = self.scoped(path)?;
        self.post(&path, body).await
    }

    pub async fn workspace_put(&self, path: &str, body: Option<Value>) -> Result<Value, V7Error> {
        let path = self.scoped(path)?;
        self.put(&path, body).await
    }

    pub async fn workspace_delete(&self, path: &str) -> Result<Value, V7Error> {
        let path = self.scoped(path)?;
        self.delete(&path).await
    }

    /// Paginator over a workspace-scoped list endpoint.
    pub fn paginator(&self, path: &str) -> Result<Paginator, V7Error> {
        Ok(Paginator::new(self.clone(), self.scoped(path)?))
    }
}

fn with_optional_body(request: ApiRequest, body: Option<Value>) -> ApiRequest {
    match body {
        Some(body) => request.with_body(body),
        None => request,
    }
}
