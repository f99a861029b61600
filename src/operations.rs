//! Domain operations: one service per resource family over a shared [`ApiClient`].
//!
//! Services borrow the client and hold no state of their own; every call builds its
//! cursor, waiter or retrier fresh.

mod agent;
mod entities;
mod exports;
mod hubs;
mod invitations;
mod projects;
mod properties;
mod templates;

pub use agent::{classify_execution, classify_plan, AgentOperations, AGENT_FAILED};
pub use entities::{field_value, EntityOperations};
pub use exports::{classify_export, default_export_name, ExportOperations, EXPORT_FAILED};
pub use hubs::{parse_hub_files, HubOperations};
pub use invitations::{InvitationOperations, InvitationRequest};
pub use projects::ProjectOperations;
pub use properties::PropertyOperations;
pub use templates::TemplateOperations;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::V7Error;
use crate::normalize::{data_items, FromRecord};
use serde_json::Value;

/// Entry point for the V7 Go API.
#[derive(Clone)]
pub struct V7Client {
    api: ApiClient,
}

impl V7Client {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, V7Error> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.api.workspace_id()
    }

    pub fn agent(&self) -> AgentOperations<'_> {
        AgentOperations::new(&self.api)
    }

    pub fn projects(&self) -> ProjectOperations<'_> {
        ProjectOperations::new(&self.api)
    }

    pub fn entities(&self) -> EntityOperations<'_> {
        EntityOperations::new(&self.api)
    }

    pub fn properties(&self) -> PropertyOperations<'_> {
        PropertyOperations::new(&self.api)
    }

    pub fn exports(&self) -> ExportOperations<'_> {
        ExportOperations::new(&self.api)
    }

    pub fn invitations(&self) -> InvitationOperations<'_> {
        InvitationOperations::new(&self.api)
    }

    pub fn templates(&self) -> TemplateOperations<'_> {
        TemplateOperations::new(&self.api)
    }

    pub fn hubs(&self) -> HubOperations<'_> {
        HubOperations::new(&self.api)
    }
}

/// Decode the `data` array of a non-paginated list response.
fn decode_list<T: FromRecord>(response: &Value) -> Result<Vec<T>, V7Error> {
    data_items(response)
        .into_iter()
        .map(T::from_record)
        .collect()
}
