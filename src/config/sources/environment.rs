//! Environment source: the `V7_GO_*` variables.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

pub const ENV_API_KEY: &str = "V7_GO_API_KEY";
/// Checked before [`ENV_BASE_URL`]; used to point at development deployments.
pub const ENV_BASE_API_URL: &str = "V7_GO_BASE_API_URL";
pub const ENV_BASE_URL: &str = "V7_GO_BASE_URL";
pub const ENV_WORKSPACE_ID: &str = "V7_GO_WORKSPACE_ID";
pub const ENV_TIMEOUT: &str = "V7_GO_TIMEOUT";

/// Layer environment values over the builder. `lookup` abstracts `std::env::var`
/// so tests do not have to mutate the process environment.
pub fn add_to_builder<F>(
    builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let timeout = match non_empty(ENV_TIMEOUT) {
        Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
            ConfigError::Message(format!(
                "{} must be a whole number of seconds, got {:?}",
                ENV_TIMEOUT, raw
            ))
        })?),
        None => None,
    };

    builder
        .set_override_option("client.api_key", non_empty(ENV_API_KEY))?
        .set_override_option(
            "client.base_url",
            non_empty(ENV_BASE_API_URL).or_else(|| non_empty(ENV_BASE_URL)),
        )?
        .set_override_option("client.workspace_id", non_empty(ENV_WORKSPACE_ID))?
        .set_override_option("client.request_timeout_secs", timeout)
}
