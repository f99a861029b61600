//! Global config file source: $XDG_CONFIG_HOME/v7/config.toml (or the platform equivalent).

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use config::FileFormat;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "v7labs", "v7").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add a TOML config file to the builder.
/// A missing file is fine unless `required` is set.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() && !required {
        debug!(config_path = %path.display(), "No config file, using environment and defaults");
        return Ok(builder);
    }
    let name = path.to_string_lossy();
    Ok(builder.add_source(File::new(name.as_ref(), FileFormat::Toml).required(required)))
}
