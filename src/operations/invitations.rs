use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::data_items;
use crate::types::Invitation;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::decode_list;

/// One entry of an invitation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub email: String,
    pub role: String,
}

impl InvitationRequest {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }
}

pub struct InvitationOperations<'a> {
    client: &'a ApiClient,
}

impl<'a> InvitationOperations<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Invitation>, V7Error> {
        let response = self.client.workspace_get("/invitations").await?;
        decode_list(&response)
    }

    /// Invite one user. Returns the per-invitation results as sent by the server.
    pub async fn create(&self, email: &str, role: &str) -> Result<Vec<Value>, V7Error> {
        self.create_bulk(&[InvitationRequest::new(email, role)])
            .await
    }

    pub async fn create_bulk(
        &self,
        invitations: &[InvitationRequest],
    ) -> Result<Vec<Value>, V7Error> {
        let response = self
            .client
            .workspace_post("/invitations", Some(json!({ "invitations": invitations })))
            .await?;
        Ok(data_items(&response))
    }

    /// Cancel a pending invitation.
    pub async fn delete(&self, invitation_id: &str) -> Result<(), V7Error> {
        self.client
            .workspace_delete(&format!("/invitations/{}", invitation_id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn create_wraps_single_invitation() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(json!({
            "data": [{"email": "a@b.co", "status": "sent"}]
        }))]));
        let client = ApiClient::new(transport.clone(), Some("ws".to_string()));

        let results = InvitationOperations::new(&client)
            .create("a@b.co", "editor")
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"invitations": [{"email": "a@b.co", "role": "editor"}]}))
        );
    }

    #[tokio::test]
    async fn list_applies_defaults() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(json!({
            "data": [{"id": "i1", "email": "a@b.co"}]
        }))]));
        let client = ApiClient::new(transport, Some("ws".to_string()));

        let invitations = InvitationOperations::new(&client).list().await.unwrap();

        assert_eq!(invitations[0].role, "member");
        assert_eq!(invitations[0].status, "pending");
    }
}
