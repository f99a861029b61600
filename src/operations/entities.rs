//! Entity (row) operations, including single-field reads and writes.

use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::pagination::{Page, Paginator, DEFAULT_PAGE_SIZE};
use crate::types::Entity;
use futures::Stream;
use serde_json::{json, Map, Value};

pub struct EntityOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> EntityOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn paginator(&self, project_id: &str) -> Result<Paginator, V7Error> {
        self.client
            .paginator(&format!("/projects/{}/entities", project_id))
    }

    fn entity_path(project_id: &str, entity_id: &str) -> String {
        format!("/projects/{}/entities/{}", project_id, entity_id)
    }

    pub async fn list(
        &self,
        project_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Page<Entity>, V7Error> {
        self.paginator(project_id)?
            .fetch_page_as(limit, offset)
            .await
    }

    pub async fn list_all(&self, project_id: &str) -> Result<Vec<Entity>, V7Error> {
        self.paginator(project_id)?
            .collect_all_as(DEFAULT_PAGE_SIZE)
            .await
    }

    pub fn iterate(
        &self,
        project_id: &str,
        page_size: usize,
    ) -> Result<impl Stream<Item = Result<Entity, V7Error>> + Send + 'static, V7Error> {
        Ok(self.paginator(project_id)?.iterate_as(page_size))
    }

    pub async fn get(&self, project_id: &str, entity_id: &str) -> Result<Entity, V7Error> {
        let response = self
            .client
            .workspace_get(&Self::entity_path(project_id, entity_id))
            .await?;
        Entity::from_record(response)
    }

    /// Effective value of one field: the tool value when present, else the manual
    /// value. An unknown slug is a validation error listing the available fields.
    pub async fn get_field(
        &self,
        project_id: &str,
        entity_id: &str,
        field_slug: &str,
    ) -> Result<Option<Value>, V7Error> {
        let entity = self.get(project_id, entity_id).await?;
        field_value(&entity, field_slug)
    }

    /// Create an entity, optionally prefilled. No body is sent when both are absent.
    pub async fn create(
        &self,
        project_id: &str,
        fields: Option<Value>,
        parent_entity_id: Option<&str>,
    ) -> Result<Entity, V7Error> {
        let mut body = Map::new();
        if let Some(fields) = fields.filter(|f| !is_empty(f)) {
            body.insert("fields".to_string(), fields);
        }
        if let Some(parent) = parent_entity_id.filter(|p| !p.is_empty()) {
            body.insert("parent_entity_id".to_string(), json!(parent));
        }
        let body = (!body.is_empty()).then_some(Value::Object(body));

        let response = self
            .client
            .workspace_post(&format!("/projects/{}/entities", project_id), body)
            .await?;
        Entity::from_record(response)
    }

    pub async fn set_field(
        &self,
        project_id: &str,
        entity_id: &str,
        property_slug: &str,
        value: Value,
    ) -> Result<Value, V7Error> {
        let path = format!(
            "{}/properties/{}/set_value",
            Self::entity_path(project_id, entity_id),
            property_slug
        );
        self.client
            .workspace_put(&path, Some(json!({ "value": value })))
            .await
    }

    /// Recalculate computed fields.
    pub async fn recalculate(&self, project_id: &str, entity_id: &str) -> Result<Value, V7Error> {
        let path = format!("{}/recalculate", Self::entity_path(project_id, entity_id));
        self.client.workspace_post(&path, None).await
    }

    pub async fn delete(&self, project_id: &str, entity_id: &str) -> Result<(), V7Error> {
        self.client
            .workspace_delete(&Self::entity_path(project_id, entity_id))
            .await?;
        Ok(())
    }
}

/// Look up `slug` on an already fetched entity.
pub fn field_value(entity: &Entity, slug: &str) -> Result<Option<Value>, V7Error> {
    match entity.field_values.get(slug) {
        Some(field) => Ok(field.value().cloned()),
        None => Err(V7Error::Validation {
            message: format!("Field '{}' not found", slug),
            details: Some(json!({
                "available_fields": entity.field_values.keys().collect::<Vec<_>>(),
            })),
        }),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
