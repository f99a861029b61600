//! Typed records returned by the V7 Go API.

use crate::error::V7Error;
use crate::normalize::{decode, null_as_default, FromRecord, KeyAliases};
use crate::waiter::PolledResource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A V7 Go project (agent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default = "default_project_type")]
    pub project_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub main_view_id: Option<String>,
    #[serde(default = "default_true")]
    pub auto_recalculations: bool,
    #[serde(default)]
    pub parent_property: Option<Value>,
}

fn default_project_type() -> String {
    "regular".to_string()
}

fn default_true() -> bool {
    true
}

const PROJECT_ALIASES: &[KeyAliases] = &[KeyAliases::new(
    "parent_property",
    &["parent_property", "parentProperty"],
)];

impl FromRecord for Project {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, PROJECT_ALIASES, "Project")
    }
}

/// A project property (column).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tool_config: Option<Value>,
    #[serde(default)]
    pub property_config: Option<Value>,
    #[serde(default)]
    pub position: i64,
}

fn default_tool() -> String {
    "manual".to_string()
}

impl FromRecord for Property {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, &[], "Property")
    }
}

/// A field value on an entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub property_id: Option<String>,
    /// Filled from the owning map key.
    #[serde(skip_deserializing)]
    pub slug: String,
    #[serde(default)]
    pub manual_value: Option<Value>,
    #[serde(default)]
    pub tool_value: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl FieldValue {
    /// Effective value: the tool value when present, else the manual value.
    pub fn value(&self) -> Option<&Value> {
        self.tool_value.as_ref().or(self.manual_value.as_ref())
    }
}

/// An entity (row) in a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_entity_id: Option<String>,
    #[serde(default)]
    pub field_values: BTreeMap<String, FieldValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_view_ids: Vec<String>,
}

// List endpoints call it `fields`, the get endpoint `field_values`.
const ENTITY_ALIASES: &[KeyAliases] =
    &[KeyAliases::new("field_values", &["fields", "field_values"])];

impl FromRecord for Entity {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        let mut entity: Entity = decode(record, ENTITY_ALIASES, "Entity")?;
        for (slug, field) in entity.field_values.iter_mut() {
            field.slug = slug.clone();
        }
        Ok(entity)
    }
}

/// A step in the agent builder plan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgentBuilderStep {
    #[serde(default, deserialize_with = "null_as_default")]
    pub property_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<String>,
}

/// An agent builder session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentBuilderSession {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub structured_plan: Vec<AgentBuilderStep>,
    #[serde(default)]
    pub created_property_ids: Vec<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub inserted_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

const SESSION_ALIASES: &[KeyAliases] = &[
    KeyAliases::new("id", &["id", "request_id"]),
    KeyAliases::new("request_id", &["request_id", "id"]),
];

impl AgentBuilderSession {
    pub fn is_complete(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "error")
    }

    pub fn is_awaiting_confirmation(&self) -> bool {
        self.status == "awaiting_confirmation"
    }
}

impl FromRecord for AgentBuilderSession {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, SESSION_ALIASES, "AgentBuilderSession")
    }
}

impl PolledResource for AgentBuilderSession {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// An agent fixer session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFixerSession {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl AgentFixerSession {
    pub fn is_complete(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "error")
    }
}

impl FromRecord for AgentFixerSession {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, &[], "AgentFixerSession")
    }
}

/// An export job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Export {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

const EXPORT_ALIASES: &[KeyAliases] = &[KeyAliases::new("download_url", &["download_url", "url"])];

impl Export {
    pub fn is_complete(&self) -> bool {
        matches!(self.status.as_str(), "completed" | "error")
    }

    /// Completed and downloadable.
    pub fn is_ready(&self) -> bool {
        self.status == "completed" && self.download_url.is_some()
    }
}

impl FromRecord for Export {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, EXPORT_ALIASES, "Export")
    }
}

impl PolledResource for Export {
    fn status(&self) -> &str {
        &self.status
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

/// A workspace or project invitation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_invitation_status")]
    pub status: String,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_role() -> String {
    "member".to_string()
}

fn default_invitation_status() -> String {
    "pending".to_string()
}

impl FromRecord for Invitation {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, &[], "Invitation")
    }
}

/// A serialisable bundle of project definitions for import and export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub projects: Vec<Value>,
    #[serde(default)]
    pub external_objects: Map<String, Value>,
}

impl FromRecord for Template {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, &[], "Template")
    }
}

/// A file in a hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub storage_key: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A knowledge hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_hub_status")]
    pub status: String,
    #[serde(default)]
    pub file_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_hub_status() -> String {
    "ready".to_string()
}

impl FromRecord for Hub {
    fn from_record(record: Value) -> Result<Self, V7Error> {
        decode(record, &[], "Hub")
    }
}
