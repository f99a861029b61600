use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::types::{Hub, HubFile};
use serde_json::{json, Map, Value};

use super::decode_list;

/// Files listed in a hub's index.
///
/// The index lives at `index.tool_value.value`, either as a JSON array or as a
/// string holding one. Entries without a `path` are skipped; anything malformed
/// yields no files.
pub fn parse_hub_files(hub: &Value) -> Vec<HubFile> {
    let raw = hub
        .get("index")
        .and_then(|index| index.get("tool_value"))
        .and_then(|tool_value| tool_value.get("value"));
    let entries = match raw {
        Some(Value::String(text)) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(entries)) => entries,
            _ => return Vec::new(),
        },
        Some(Value::Array(entries)) => entries.clone(),
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| {
            let path = entry.get("path").and_then(Value::as_str)?;
            if path.is_empty() {
                return None;
            }
            Some(HubFile {
                id: entry
                    .get("slug")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                name: path.trim_start_matches('/').to_string(),
                storage_key: None,
                content_type: None,
                size: None,
                created_at: None,
            })
        })
        .collect()
}

pub struct HubOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> HubOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Hub>, V7Error> {
        let response = self.client.workspace_get("/hubs").await?;
        decode_list(&response)
    }

    pub async fn get(&self, hub_id: &str) -> Result<Hub, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/hubs/{}", hub_id))
            .await?;
        Hub::from_record(response)
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Hub, V7Error> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            body.insert("description".to_string(), json!(description));
        }
        let response = self
            .client
            .workspace_post("/hubs", Some(Value::Object(body)))
            .await?;
        Hub::from_record(response)
    }

    pub async fn delete(&self, hub_id: &str) -> Result<(), V7Error> {
        self.client
            .workspace_delete(&format!("/hubs/{}", hub_id))
            .await?;
        Ok(())
    }

    pub async fn list_files(&self, hub_id: &str) -> Result<Vec<HubFile>, V7Error> {
        let hub = self
            .client
            .workspace_get(&format!("/hubs/{}", hub_id))
            .await?;
        Ok(parse_hub_files(&hub))
    }

    pub async fn reindex(&self, hub_id: &str) -> Result<Value, V7Error> {
        self.client
            .workspace_post(&format!("/hubs/{}/reindex", hub_id), None)
            .await
    }
}
