use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::types::Property;
use serde_json::json;

use super::decode_list;

pub struct PropertyOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> PropertyOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, project_id: &str) -> Result<Vec<Property>, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/projects/{}/properties", project_id))
            .await?;
        decode_list(&response)
    }

    /// Fetch by id or slug.
    pub async fn get(&self, project_id: &str, property: &str) -> Result<Property, V7Error> {
        let response = self
            .client
            .workspace_get(&format!("/projects/{}/properties/{}", project_id, property))
            .await?;
        Property::from_record(response)
    }

    /// Let the server configure a property from a description.
    pub async fn add_from_prompt(&self, project_id: &str, prompt: &str) -> Result<Property, V7Error> {
        let response = self
            .client
            .workspace_post(
                &format!("/projects/{}/properties/from_prompt", project_id),
                Some(json!({ "prompt": prompt })),
            )
            .await?;
        Property::from_record(response)
    }

    pub async fn delete(&self, project_id: &str, property: &str) -> Result<(), V7Error> {
        self.client
            .workspace_delete(&format!("/projects/{}/properties/{}", project_id, property))
            .await?;
        Ok(())
    }
}
