//! Agent builder and export presentation: status text and json.

use crate::types::{AgentBuilderSession, AgentFixerSession, Export};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

fn styled_status(status: &str) -> String {
    match status {
        "completed" | "awaiting_confirmation" => status.green().to_string(),
        "error" => status.red().to_string(),
        _ => status.yellow().to_string(),
    }
}

pub fn format_session_text(session: &AgentBuilderSession) -> String {
    let mut output = format!("Status: {}\n", styled_status(&session.status));
    if let Some(project_id) = &session.project_id {
        output.push_str(&format!("Project ID: {}\n", project_id));
    }
    if let Some(error) = &session.error_message {
        output.push_str(&format!("Error: {}\n", error.red()));
    }
    if !session.structured_plan.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            format!("Plan ({} steps):", session.structured_plan.len()).bold()
        ));
        for (i, step) in session.structured_plan.iter().enumerate() {
            output.push_str(&format!(
                "  {}. [{}] {}: {}\n",
                i + 1,
                step.property_id,
                step.title,
                step.description
            ));
        }
    }
    output.trim_end().to_string()
}

pub fn session_json(session: &AgentBuilderSession) -> Value {
    json!({
        "request_id": session.request_id,
        "status": session.status,
        "project_id": session.project_id,
        "structured_plan": session.structured_plan,
        "error_message": session.error_message,
    })
}

pub fn fixer_session_json(session: &AgentFixerSession) -> Value {
    json!({
        "request_id": session.request_id,
        "status": session.status,
        "project_id": session.project_id,
        "message": "Agent fixer started. Use 'v7 agent_builder status <request_id>' to check progress.",
    })
}

/// Text for a created export; `waited` adds the download line.
pub fn format_export_text(export: &Export, waited: bool) -> String {
    let mut output = format!(
        "Export: {}\nFormat: {}\nStatus: {}",
        export.id,
        export.format,
        styled_status(&export.status)
    );
    if waited {
        output.push_str("\n\nExport ready!");
        if let Some(url) = &export.download_url {
            output.push_str(&format!("\nDownload URL: {}", url));
        }
    }
    output
}
