//! Config loading facade: one entry point that layers every source in order.

use crate::config::merge::merge_policy;
use crate::config::sources::{environment, global_file};
use crate::config::{ConfigOverrides, V7Config};
use crate::error::V7Error;
use std::path::Path;
use tracing::debug;

/// Loads [`V7Config`] once at startup.
///
/// Precedence (highest to lowest):
/// 1. Explicit overrides (CLI flags, constructor arguments)
/// 2. `V7_GO_*` environment variables
/// 3. Config file (`--config` path, else the global file)
/// 4. Defaults
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load using the global config file and the process environment.
    pub fn load(overrides: &ConfigOverrides) -> Result<V7Config, V7Error> {
        let global = global_file::global_config_path();
        Self::load_with(global.as_deref(), false, overrides, |key| {
            std::env::var(key).ok()
        })
    }

    /// Load using an explicit config file, which must exist.
    pub fn load_from_file(path: &Path, overrides: &ConfigOverrides) -> Result<V7Config, V7Error> {
        Self::load_with(Some(path), true, overrides, |key| std::env::var(key).ok())
    }

    /// Load with an injectable environment lookup.
    pub fn load_with<F>(
        file: Option<&Path>,
        file_required: bool,
        overrides: &ConfigOverrides,
        env_lookup: F,
    ) -> Result<V7Config, V7Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = file {
            builder = global_file::add_to_builder(builder, path, file_required)?;
        }
        builder = environment::add_to_builder(builder, env_lookup)?;
        builder = merge_policy::apply_overrides(builder, overrides)?;

        let mut config: V7Config = builder.build()?.try_deserialize()?;
        config.client = config.client.normalized();
        config.client.validate()?;

        debug!(client = ?config.client, "Configuration loaded");
        Ok(config)
    }
}
