//! Template import with automatic rename on duplicate-name conflicts.
//!
//! A template import creates every project in the bundle in one request. When the
//! server rejects the batch because a name is taken, the importer renames every
//! project to `"<original> (n)"` with one shared counter and resubmits. Names are
//! always derived from the snapshot taken before the first submission.

use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::{data_items, FromRecord};
use crate::types::{Project, Template};
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

pub const IMPORT_PATH: &str = "/projects/import_from_template";
pub const DEFAULT_MAX_RETRIES: u32 = 10;
const UNNAMED: &str = "Unnamed";

/// Whether an API error is a duplicate-name conflict that a rename can resolve.
///
/// Matches `duplicate_name` or `duplicate name` in the message (any case), or
/// `duplicate_name` anywhere in the structured details.
pub fn is_duplicate_name_conflict(err: &V7Error) -> bool {
    let V7Error::Api {
        message, details, ..
    } = err
    else {
        return false;
    };
    let message = message.to_lowercase();
    if message.contains("duplicate_name") || message.contains("duplicate name") {
        return true;
    }
    details
        .as_ref()
        .map(|d| d.to_string().to_lowercase().contains("duplicate_name"))
        .unwrap_or(false)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub folder_id: Option<String>,
    pub auto_rename: bool,
    pub max_retries: u32,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            folder_id: None,
            auto_rename: true,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl ImportOptions {
    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn auto_rename(mut self, enabled: bool) -> Self {
        self.auto_rename = enabled;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Submission payload plus the name snapshot it was built from.
struct ImportPayload {
    body: Map<String, Value>,
    original_names: Vec<String>,
}

impl ImportPayload {
    fn new(template: &Template, folder_id: Option<&str>) -> Self {
        let original_names = template
            .projects
            .iter()
            .map(|project| {
                project
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or(UNNAMED)
                    .to_string()
            })
            .collect();

        let mut body = Map::new();
        body.insert("projects".to_string(), Value::Array(template.projects.clone()));
        body.insert(
            "external_objects".to_string(),
            Value::Object(template.external_objects.clone()),
        );
        if let Some(folder_id) = folder_id {
            body.insert("parent_folder_id".to_string(), json!(folder_id));
        }

        Self {
            body,
            original_names,
        }
    }

    /// Rename every project to `"<original> (suffix)"`.
    fn apply_suffix(&mut self, suffix: u32) {
        let Some(Value::Array(projects)) = self.body.get_mut("projects") else {
            return;
        };
        for (project, original) in projects.iter_mut().zip(&self.original_names) {
            if let Value::Object(project) = project {
                project.insert(
                    "name".to_string(),
                    Value::String(format!("{} ({})", original, suffix)),
                );
            }
        }
    }

    fn to_value(&self) -> Value {
        Value::Object(self.body.clone())
    }
}

/// Submits a template and resolves the projects it created.
pub struct TemplateImporter<'a> {
    client: &'a ApiClient,
}

impl<'a> TemplateImporter<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn import(
        &self,
        template: &Template,
        options: &ImportOptions,
    ) -> Result<Vec<Project>, V7Error> {
        let mut payload = ImportPayload::new(template, options.folder_id.as_deref());
        let mut suffix: u32 = 0;

        loop {
            match self
                .client
                .workspace_post(IMPORT_PATH, Some(payload.to_value()))
                .await
            {
                Ok(response) => {
                    info!(attempts = suffix + 1, "Template imported");
                    return self.resolve_created(&response).await;
                }
                Err(err) => {
                    let retryable = options.auto_rename
                        && suffix < options.max_retries
                        && is_duplicate_name_conflict(&err);
                    if !retryable {
                        return Err(err);
                    }
                    suffix += 1;
                    warn!(
                        suffix,
                        max_retries = options.max_retries,
                        error = %err,
                        "Duplicate project name, retrying with suffix"
                    );
                    payload.apply_suffix(suffix);
                }
            }
        }
    }

    /// Fetch each created project. Fetches that fail are skipped.
    async fn resolve_created(&self, response: &Value) -> Result<Vec<Project>, V7Error> {
        let instantiated = response
            .get("instantiated_objects")
            .and_then(Value::as_object)
            .filter(|map| !map.is_empty());

        let Some(instantiated) = instantiated else {
            debug!("No instantiated_objects in import response, reading data");
            return data_items(response)
                .into_iter()
                .map(Project::from_record)
                .collect();
        };

        let mut projects = Vec::with_capacity(instantiated.len());
        for (template_id, real_id) in instantiated {
            let Some(real_id) = real_id.as_str() else {
                continue;
            };
            let fetched = self
                .client
                .workspace_get(&format!("/projects/{}", real_id))
                .await
                .and_then(Project::from_record);
            match fetched {
                Ok(project) => projects.push(project),
                Err(err) => {
                    warn!(%template_id, project_id = %real_id, error = %err, "Skipping imported project");
                }
            }
        }
        Ok(projects)
    }
}
