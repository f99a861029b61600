//! Command-name contract for logging and routing.

use crate::cli::parse::{
    AgentBuilderCommands, Commands, EntityCommands, HubCommands, ProjectCommands, PropCommands,
    TemplateCommands,
};

/// Dotted command name (e.g. "ent.list", "agent_builder.create").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::AgentBuilder { command } => {
            format!("agent_builder.{}", agent_builder_command_name(command))
        }
        Commands::Projects { command } => format!("projects.{}", project_command_name(command)),
        Commands::Props { command } => format!("props.{}", prop_command_name(command)),
        Commands::Ent { command } => format!("ent.{}", entity_command_name(command)),
        Commands::Export { .. } => "export".to_string(),
        Commands::Invite { .. } => "invite".to_string(),
        Commands::Template { command } => format!("template.{}", template_command_name(command)),
        Commands::Hub { command } => format!("hub.{}", hub_command_name(command)),
    }
}

pub fn agent_builder_command_name(command: &AgentBuilderCommands) -> &'static str {
    match command {
        AgentBuilderCommands::Create { .. } => "create",
        AgentBuilderCommands::Status { .. } => "status",
        AgentBuilderCommands::Followup { .. } => "followup",
        AgentBuilderCommands::Execute { .. } => "execute",
        AgentBuilderCommands::Fix { .. } => "fix",
    }
}

pub fn project_command_name(command: &ProjectCommands) -> &'static str {
    match command {
        ProjectCommands::List { .. } => "list",
        ProjectCommands::Get { .. } => "get",
        ProjectCommands::Delete { .. } => "delete",
    }
}

pub fn prop_command_name(command: &PropCommands) -> &'static str {
    match command {
        PropCommands::List { .. } => "list",
        PropCommands::Add { .. } => "add",
        PropCommands::Get { .. } => "get",
        PropCommands::Delete { .. } => "delete",
    }
}

pub fn entity_command_name(command: &EntityCommands) -> &'static str {
    match command {
        EntityCommands::List { .. } => "list",
        EntityCommands::Create { .. } => "create",
        EntityCommands::Get { .. } => "get",
        EntityCommands::Set { .. } => "set",
        EntityCommands::Recalc { .. } => "recalc",
        EntityCommands::Delete { .. } => "delete",
    }
}

pub fn template_command_name(command: &TemplateCommands) -> &'static str {
    match command {
        TemplateCommands::Export { .. } => "export",
        TemplateCommands::Import { .. } => "import",
    }
}

pub fn hub_command_name(command: &HubCommands) -> &'static str {
    match command {
        HubCommands::List => "list",
        HubCommands::Get { .. } => "get",
        HubCommands::Files { .. } => "files",
    }
}
