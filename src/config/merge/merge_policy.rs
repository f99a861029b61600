//! Merge rules: defaults, override order, conflict handling.

use crate::config::{ConfigOverrides, DEFAULT_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("client.base_url", DEFAULT_BASE_URL)?
        .set_default("client.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")
}

/// Apply explicit overrides last so they win over file and environment values.
pub fn apply_overrides(
    builder: ConfigBuilder<DefaultState>,
    overrides: &ConfigOverrides,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("client.api_key", overrides.api_key.clone())?
        .set_override_option("client.base_url", overrides.base_url.clone())?
        .set_override_option("client.workspace_id", overrides.workspace_id.clone())
}
