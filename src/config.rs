//! Configuration System
//!
//! Client and logging configuration resolved once at startup. Sources are layered
//! with the `config` crate: defaults, an optional TOML file, environment variables,
//! then explicit overrides from the CLI or constructor arguments.

use crate::error::V7Error;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::{
    ENV_API_KEY, ENV_BASE_API_URL, ENV_BASE_URL, ENV_TIMEOUT, ENV_WORKSPACE_ID,
};
pub use sources::global_file::global_config_path;

pub const DEFAULT_BASE_URL: &str = "https://api.go.v7labs.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct V7Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Immutable connection settings shared by the transport and the SDK.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Default workspace for workspace-scoped calls
    #[serde(default)]
    pub workspace_id: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            workspace_id: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// Keeps the API key out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("workspace_id", &self.workspace_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Build a config directly, bypassing file and environment sources.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
            ..Self::default()
        }
        .normalized()
    }

    pub fn with_workspace(mut self, workspace_id: impl Into<String>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Strip trailing slashes from the base URL and drop empty optional values.
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.api_key = self.api_key.filter(|k| !k.is_empty());
        self.workspace_id = self.workspace_id.filter(|w| !w.is_empty());
        self
    }

    pub fn validate(&self) -> Result<(), V7Error> {
        if self.base_url.is_empty() {
            return Err(V7Error::Config("Base URL cannot be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(V7Error::Config(format!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(V7Error::Config(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Explicit values that win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub workspace_id: Option<String>,
}
