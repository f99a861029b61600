//! CLI output: mode detection, JSON rendering and error mapping.

use crate::error::V7Error;
use serde_json::Value;
use std::io::IsTerminal;

/// Rows shown in human mode when no limit is given.
pub const HUMAN_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Interactive terminal: tables and bounded lists.
    Human,
    /// Pipe or redirect: compact JSON, lists fully paginated.
    Machine,
}

impl OutputMode {
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            OutputMode::Human
        } else {
            OutputMode::Machine
        }
    }

    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

/// Indented for terminals, single-line for pipes.
pub fn render_json(value: &Value, mode: OutputMode) -> String {
    let rendered = match mode {
        OutputMode::Human => serde_json::to_string_pretty(value),
        OutputMode::Machine => serde_json::to_string(value),
    };
    rendered.unwrap_or_else(|_| "{}".to_string())
}

/// Structured error object printed before exiting non-zero.
pub fn map_error(e: &V7Error, mode: OutputMode) -> String {
    render_json(&e.to_json(), mode)
}
