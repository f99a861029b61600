use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::template_import::{ImportOptions, TemplateImporter};
use crate::types::{Project, Template};
use serde_json::{json, Value};

pub struct TemplateOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> TemplateOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Export one project as a template. References to objects outside the project
    /// are collected under `external_objects`.
    pub async fn export_project(&self, project_id: &str) -> Result<Template, V7Error> {
        let response = self
            .client
            .workspace_post(
                "/projects/export_to_template",
                Some(json!({
                    "project_ids": [project_id],
                    "unexported_references": "external_objects",
                })),
            )
            .await?;
        Template::from_record(response)
    }

    pub async fn import_template(
        &self,
        template: &Template,
        options: &ImportOptions,
    ) -> Result<Vec<Project>, V7Error> {
        TemplateImporter::new(self.client)
            .import(template, options)
            .await
    }

    /// Import the first template project's properties into an existing project.
    pub async fn import_properties(
        &self,
        project_id: &str,
        template: &Template,
    ) -> Result<Value, V7Error> {
        let properties = template
            .projects
            .first()
            .and_then(|project| project.get("properties"))
            .cloned()
            .unwrap_or_else(|| json!([]));
        self.client
            .workspace_post(
                &format!("/projects/{}/import_properties", project_id),
                Some(json!({
                    "properties": properties,
                    "external_objects": template.external_objects,
                })),
            )
            .await
    }
}
