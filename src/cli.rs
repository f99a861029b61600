//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain operations.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{map_error, render_json, OutputMode, HUMAN_LIMIT};
pub use parse::{
    AgentBuilderCommands, Cli, Commands, EntityCommands, HubCommands, ProjectCommands,
    PropCommands, TemplateCommands,
};
pub use route::{load_config, RunContext, PROPS_ADD_REDIRECT};
