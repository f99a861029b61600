//! CLI parse: clap types for v7. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const EXPORT_FORMATS: [&str; 2] = ["csv", "xlsx"];
pub const INVITE_ROLES: [&str; 6] = ["admin", "editor", "contributor", "reviewer", "reader", "worker"];

/// V7 Go CLI - command-line interface for the V7 Go API
#[derive(Parser, Debug)]
#[command(name = "v7")]
#[command(about = "Command-line interface for the V7 Go API")]
#[command(after_help = "Output modes:
  TTY (human):  tables, limited rows
  Pipe (machine): full JSON, lists auto-paginate

Examples:
  v7 agent_builder create \"Extract invoice data: vendor, amount, due date\"
  v7 agent_builder status <request_id>
  v7 ent list <project_id> | jq '.data[].id'
  v7 export <project_id> --format csv")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace ID (overrides V7_GO_WORKSPACE_ID)
    #[arg(long, short = 'w', global = true)]
    pub workspace: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key (overrides V7_GO_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (overrides V7_GO_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable verbose logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create agents from natural language
    #[command(name = "agent_builder")]
    AgentBuilder {
        #[command(subcommand)]
        command: AgentBuilderCommands,
    },
    /// List and manage projects
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Manage properties (columns)
    Props {
        #[command(subcommand)]
        command: PropCommands,
    },
    /// Manage entities (rows)
    Ent {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Export project data
    Export {
        /// Project ID to export
        project_id: String,
        /// Export format
        #[arg(long, short = 'f', default_value = "csv", value_parser = EXPORT_FORMATS)]
        format: String,
        /// Export name (generated when omitted)
        #[arg(long, short = 'n')]
        name: Option<String>,
        /// Return once the export is created instead of waiting for the file
        #[arg(long)]
        no_wait: bool,
    },
    /// Invite a user to the workspace
    Invite {
        /// Email address to invite
        email: String,
        /// Role to assign
        #[arg(long, short = 'r', default_value = "editor", value_parser = INVITE_ROLES)]
        role: String,
    },
    /// Import and export agent templates
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Manage knowledge hubs
    Hub {
        #[command(subcommand)]
        command: HubCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AgentBuilderCommands {
    /// Create a new agent from a prompt
    Create {
        /// Describe the agent you want to build
        prompt: String,
        /// Wait until the plan is ready
        #[arg(long)]
        wait: bool,
    },
    /// Check agent builder status
    Status {
        /// Request ID from create
        request_id: String,
    },
    /// Refine the agent plan
    Followup {
        request_id: String,
        /// Refinement message
        message: String,
    },
    /// Execute the plan to create the agent
    Execute {
        request_id: String,
        /// Wait until execution completes
        #[arg(long)]
        wait: bool,
    },
    /// Fix an existing agent
    Fix {
        /// Project ID of the agent to fix
        project_id: String,
        /// What to fix
        prompt: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// List projects
    List {
        /// Max results (TTY only)
        #[arg(long, short = 'l')]
        limit: Option<usize>,
        /// Offset for pagination
        #[arg(long, short = 'o')]
        offset: Option<usize>,
    },
    /// Get project details
    Get { project_id: String },
    /// Delete a project
    Delete { project_id: String },
}

#[derive(Subcommand, Debug)]
pub enum PropCommands {
    /// List properties
    List { project_id: String },
    /// Add a property (use the agent builder instead)
    Add {
        project_id: String,
        /// Property description
        prompt: String,
    },
    /// Get property details
    Get {
        project_id: String,
        /// Property ID or slug
        property_id: String,
    },
    /// Delete a property
    Delete {
        project_id: String,
        /// Property ID or slug
        property_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntityCommands {
    /// List entities
    List {
        project_id: String,
        /// Max results (TTY only)
        #[arg(long, short = 'l')]
        limit: Option<usize>,
        /// Offset for pagination
        #[arg(long, short = 'o')]
        offset: Option<usize>,
    },
    /// Create an entity
    Create {
        project_id: String,
        /// JSON object of field values to prefill, or - for stdin
        #[arg(long, short = 'f')]
        fields: Option<String>,
        /// Parent entity ID (collection projects)
        #[arg(long = "parent")]
        parent_entity_id: Option<String>,
    },
    /// Get entity details
    Get {
        project_id: String,
        entity_id: String,
        /// Print one field value by slug
        #[arg(long, short = 'f')]
        field: Option<String>,
    },
    /// Set a field value
    Set {
        project_id: String,
        entity_id: String,
        property_slug: String,
        /// Value (JSON or plain string)
        value: String,
    },
    /// Recalculate computed fields
    Recalc { project_id: String, entity_id: String },
    /// Delete an entity
    Delete { project_id: String, entity_id: String },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Export a project to template JSON
    Export { project_id: String },
    /// Import projects from a template
    Import {
        /// Template JSON file, or - for stdin
        file: String,
        /// Parent folder ID for imported projects
        #[arg(long, short = 'f')]
        folder: Option<String>,
        /// Fail on duplicate names instead of renaming
        #[arg(long)]
        no_auto_rename: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HubCommands {
    /// List hubs
    List,
    /// Get hub details
    Get { hub_id: String },
    /// List files in a hub
    Files { hub_id: String },
}
