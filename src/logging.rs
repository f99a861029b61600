//! Logging
//!
//! `tracing` subscriber setup for the CLI. Events always go to stderr so that
//! machine-readable JSON on stdout stays clean for pipes.

use crate::error::V7Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Filter directives; wins over the configured level.
pub const ENV_LOG: &str = "V7_LOG";
/// `json` or `text`; wins over the configured format when valid.
pub const ENV_LOG_FORMAT: &str = "V7_LOG_FORMAT";

/// `[logging]` table of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error or off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// json or text
    #[serde(default = "default_format")]
    pub format: String,

    /// ANSI colours (text format only)
    #[serde(default = "default_color")]
    pub color: bool,

    /// Per-target levels, e.g. `"v7go::waiter" = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    LogFormat::Text.as_str().to_string()
}

fn default_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_color(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = V7Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(V7Error::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

type FilteredRegistry = Layered<EnvFilter, Registry>;

/// Install the global subscriber.
///
/// `V7_LOG` and `V7_LOG_FORMAT` win over `config`, which already carries the
/// merged CLI flags and config file values.
pub fn init_logging(config: &LoggingConfig) -> Result<(), V7Error> {
    let lookup = |key: &str| std::env::var(key).ok();
    let filter = resolve_filter(config, lookup)?;
    let format = resolve_format(config, lookup)?;

    let output: Box<dyn Layer<FilteredRegistry> + Send + Sync> = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(config.color)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    Registry::default()
        .with(filter)
        .with(output)
        .try_init()
        .map_err(|e| V7Error::Config(format!("Failed to install logger: {}", e)))
}

fn resolve_filter<F>(config: &LoggingConfig, lookup: F) -> Result<EnvFilter, V7Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(directives) = lookup(ENV_LOG).filter(|d| !d.trim().is_empty()) {
        return EnvFilter::try_new(&directives)
            .map_err(|e| V7Error::Config(format!("Invalid {}: {}", ENV_LOG, e)));
    }
    if config.level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| V7Error::Config(format!("Invalid log level '{}': {}", config.level, e)))?;
    for (target, level) in &config.modules {
        let directive = format!("{}={}", target, level)
            .parse()
            .map_err(|e| V7Error::Config(format!("Invalid log directive: {}", e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// An unrecognised `V7_LOG_FORMAT` is ignored; an unrecognised config value is an error.
fn resolve_format<F>(config: &LoggingConfig, lookup: F) -> Result<LogFormat, V7Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(format) = lookup(ENV_LOG_FORMAT).and_then(|raw| raw.parse().ok()) {
        return Ok(format);
    }
    config.format.parse()
}
