//! Export jobs: create, inspect and wait for a downloadable file.

use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::types::Export;
use crate::waiter::{OperationState, WaitPolicy, Waiter};
use chrono::Local;
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;

use super::decode_list;

pub const EXPORT_FAILED: &str = "Export failed";

/// An export is done only once it is completed and has a download reference.
pub fn classify_export(export: &Export) -> OperationState {
    if export.is_ready() {
        OperationState::Succeeded
    } else if export.status == "error" {
        OperationState::Failed
    } else {
        OperationState::Pending
    }
}

/// `export-YYYYmmdd-HHMMSS` in local time.
pub fn default_export_name() -> String {
    Local::now().format("export-%Y%m%d-%H%M%S").to_string()
}

pub struct ExportOperations<'a> {
    client: &'a ApiClient,
    cancel: Option<CancellationToken>,
}

impl<'a> ExportOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub async fn create(
        &self,
        project_id: &str,
        format: &str,
        name: Option<&str>,
        view_id: Option<&str>,
    ) -> Result<Export, V7Error> {
        let mut body = Map::new();
        body.insert(
            "name".to_string(),
            json!(name.map(str::to_string).unwrap_or_else(default_export_name)),
        );
        body.insert("format".to_string(), json!(format));
        if let Some(view_id) = view_id.filter(|v| !v.is_empty()) {
            body.insert("view_id".to_string(), json!(view_id));
        }

        let response = self
            .client
            .workspace_post(
                &format!("/projects/{}/exports", project_id),
                Some(Value::Object(body)),
            )
            .await?;
        Export::from_record(response)
    }

    pub async fn get(&self, project_id: &str, export_id: &str) -> Result<Export, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/projects/{}/exports/{}", project_id, export_id))
            .await?;
        Export::from_record(response)
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Export>, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/projects/{}/exports", project_id))
            .await?;
        decode_list(&response)
    }

    pub async fn wait_for_completion(
        &self,
        project_id: &str,
        export_id: &str,
        policy: WaitPolicy,
    ) -> Result<Export, V7Error> {
        let mut waiter = Waiter::new(policy)
            .subject("export")
            .failure_message(EXPORT_FAILED);
        if let Some(token) = &self.cancel {
            waiter = waiter.with_cancellation(token.clone());
        }
        waiter
            .wait(|| self.get(project_id, export_id), classify_export)
            .await
    }
}
