//! CLI route: single route table and run context. Dispatches to domain operations
//! and presentation.

use crate::cli::help::command_name;
use crate::cli::output::{render_json, OutputMode, HUMAN_LIMIT};
use crate::cli::parse::{
    AgentBuilderCommands, Cli, Commands, EntityCommands, HubCommands, ProjectCommands,
    PropCommands, TemplateCommands,
};
use crate::cli::presentation::{
    entity_detail_json, entity_summary_json, fixer_session_json, format_entities_table,
    format_export_text, format_hub_files_table, format_hubs_table, format_projects_table,
    format_properties_table, format_session_text, hub_file_json, hub_json, hub_summary_json,
    project_detail_json, project_summary_json, property_detail_json, property_summary_json,
    session_json,
};
use crate::config::{ClientConfig, ConfigLoader, ConfigOverrides, V7Config};
use crate::error::V7Error;
use crate::normalize::FromRecord;
use crate::operations::{field_value, V7Client};
use crate::template_import::ImportOptions;
use crate::types::{AgentBuilderSession, Template};
use crate::waiter::WaitPolicy;
use serde_json::{json, Value};
use std::io::Read;
use std::time::Instant;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span};

pub const PROPS_ADD_REDIRECT: &str = "Direct property creation is not supported via CLI. \
Use the agent builder instead: v7 agent_builder create \"<prompt>\" to create a new agent with properties";

/// Runtime context for CLI execution: resolved client, async runtime and output mode.
pub struct RunContext {
    client: V7Client,
    runtime: Runtime,
    mode: OutputMode,
}

/// Resolve configuration once from flags, environment and config file.
///
/// `--config` makes the file mandatory; otherwise the global file is optional.
pub fn load_config(cli: &Cli) -> Result<V7Config, V7Error> {
    let overrides = ConfigOverrides {
        api_key: cli.api_key.clone(),
        base_url: cli.base_url.clone(),
        workspace_id: cli.workspace.clone(),
    };
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path, &overrides),
        None => ConfigLoader::load(&overrides),
    }
}

impl RunContext {
    /// Build the HTTP client from already resolved configuration.
    pub fn new(config: ClientConfig, mode: OutputMode) -> Result<Self, V7Error> {
        Self::with_client(V7Client::from_config(config)?, mode)
    }

    pub fn with_client(client: V7Client, mode: OutputMode) -> Result<Self, V7Error> {
        let runtime = Runtime::new()
            .map_err(|e| V7Error::Config(format!("Failed to start async runtime: {}", e)))?;
        Ok(Self {
            client,
            runtime,
            mode,
        })
    }

    pub fn client(&self) -> &V7Client {
        &self.client
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, V7Error> {
        let name = command_name(command);
        let span = info_span!("command", command = %name);
        let _entered = span.enter();
        let started = Instant::now();

        let result = self.runtime.block_on(self.dispatch(command));

        info!(
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    async fn dispatch(&self, command: &Commands) -> Result<String, V7Error> {
        match command {
            Commands::AgentBuilder { command } => self.handle_agent_builder(command).await,
            Commands::Projects { command } => self.handle_projects(command).await,
            Commands::Props { command } => self.handle_props(command).await,
            Commands::Ent { command } => self.handle_entities(command).await,
            Commands::Export {
                project_id,
                format,
                name,
                no_wait,
            } => {
                self.handle_export(project_id, format, name.as_deref(), *no_wait)
                    .await
            }
            Commands::Invite { email, role } => {
                let data = self.client.invitations().create(email, role).await?;
                Ok(self.json(json!({
                    "success": true,
                    "message": format!("Invitation sent to {}", email),
                    "data": data,
                })))
            }
            Commands::Template { command } => self.handle_template(command).await,
            Commands::Hub { command } => self.handle_hub(command).await,
        }
    }

    fn json(&self, value: Value) -> String {
        render_json(&value, self.mode)
    }

    fn session(&self, session: &AgentBuilderSession) -> String {
        if self.mode.is_human() {
            format_session_text(session)
        } else {
            self.json(session_json(session))
        }
    }

    async fn handle_agent_builder(&self, command: &AgentBuilderCommands) -> Result<String, V7Error> {
        match command {
            AgentBuilderCommands::Create { prompt, wait } => {
                let session = self.client.agent().create(prompt).await?;
                if *wait {
                    let agent = self
                        .client
                        .agent()
                        .with_cancellation(cancel_on_interrupt());
                    let ready = agent
                        .wait_for_plan(&session.request_id, WaitPolicy::PLAN)
                        .await?;
                    return Ok(self.session(&ready));
                }
                Ok(self.json(json!({
                    "request_id": session.request_id,
                    "status": session.status,
                    "message": "Agent builder started. Use 'v7 agent_builder status <request_id>' to check progress.",
                })))
            }
            AgentBuilderCommands::Status { request_id } => {
                let session = self.client.agent().status(request_id).await?;
                Ok(self.session(&session))
            }
            AgentBuilderCommands::Followup {
                request_id,
                message,
            } => {
                let session = self.client.agent().followup(request_id, message).await?;
                Ok(self.json(json!({
                    "request_id": session.request_id,
                    "status": session.status,
                    "message": "Followup sent. Use 'v7 agent_builder status <request_id>' to check the updated plan.",
                })))
            }
            AgentBuilderCommands::Execute { request_id, wait } => {
                let session = self.client.agent().execute(request_id).await?;
                if *wait {
                    let agent = self
                        .client
                        .agent()
                        .with_cancellation(cancel_on_interrupt());
                    let done = agent
                        .wait_for_completion(&session.request_id, WaitPolicy::EXECUTION)
                        .await?;
                    return Ok(self.session(&done));
                }
                Ok(self.json(json!({
                    "request_id": session.request_id,
                    "status": session.status,
                    "project_id": session.project_id,
                    "message": "Execution started. Use 'v7 agent_builder status <request_id>' to check progress.",
                })))
            }
            AgentBuilderCommands::Fix { project_id, prompt } => {
                let session = self.client.agent().fix(project_id, prompt).await?;
                Ok(self.json(fixer_session_json(&session)))
            }
        }
    }

    async fn handle_projects(&self, command: &ProjectCommands) -> Result<String, V7Error> {
        let projects = self.client.projects();
        match command {
            ProjectCommands::List { limit, offset } => {
                if self.mode.is_human() {
                    let page = projects
                        .list(limit.unwrap_or(HUMAN_LIMIT), offset.unwrap_or(0))
                        .await?;
                    return Ok(format_projects_table(&page));
                }
                let all = projects.list_all().await?;
                Ok(self.json(json!({
                    "data": all.iter().map(project_summary_json).collect::<Vec<_>>(),
                    "total_count": all.len(),
                })))
            }
            ProjectCommands::Get { project_id } => {
                let project = projects.get(project_id).await?;
                Ok(self.json(project_detail_json(&project)))
            }
            ProjectCommands::Delete { project_id } => {
                projects.delete(project_id).await?;
                Ok(self.json(json!({
                    "success": true,
                    "message": format!("Project {} deleted", project_id),
                })))
            }
        }
    }

    async fn handle_props(&self, command: &PropCommands) -> Result<String, V7Error> {
        let properties = self.client.properties();
        match command {
            PropCommands::List { project_id } => {
                let props = properties.list(project_id).await?;
                if self.mode.is_human() {
                    return Ok(format_properties_table(&props));
                }
                Ok(self.json(json!({
                    "data": props.iter().map(property_summary_json).collect::<Vec<_>>(),
                })))
            }
            PropCommands::Add { .. } => Err(V7Error::validation(PROPS_ADD_REDIRECT)),
            PropCommands::Get {
                project_id,
                property_id,
            } => {
                let prop = properties.get(project_id, property_id).await?;
                Ok(self.json(property_detail_json(&prop)))
            }
            PropCommands::Delete {
                project_id,
                property_id,
            } => {
                properties.delete(project_id, property_id).await?;
                Ok(self.json(json!({
                    "success": true,
                    "message": format!("Property {} deleted", property_id),
                })))
            }
        }
    }

    async fn handle_entities(&self, command: &EntityCommands) -> Result<String, V7Error> {
        let entities = self.client.entities();
        match command {
            EntityCommands::List {
                project_id,
                limit,
                offset,
            } => {
                if self.mode.is_human() {
                    let page = entities
                        .list(project_id, limit.unwrap_or(HUMAN_LIMIT), offset.unwrap_or(0))
                        .await?;
                    return Ok(format_entities_table(&page));
                }
                let all = entities.list_all(project_id).await?;
                Ok(self.json(json!({
                    "data": all.iter().map(entity_summary_json).collect::<Vec<_>>(),
                    "total_count": all.len(),
                })))
            }
            EntityCommands::Create {
                project_id,
                fields,
                parent_entity_id,
            } => {
                let fields = match fields.as_deref() {
                    Some("-") => Some(parse_fields(&read_stdin()?)?),
                    Some(raw) => Some(parse_fields(raw)?),
                    None => None,
                };
                let entity = entities
                    .create(project_id, fields, parent_entity_id.as_deref())
                    .await?;
                Ok(self.json(json!({
                    "id": entity.id,
                    "project_id": entity.project_id,
                    "message": "Entity created",
                })))
            }
            EntityCommands::Get {
                project_id,
                entity_id,
                field,
            } => {
                let entity = entities.get(project_id, entity_id).await?;
                match field {
                    Some(slug) => Ok(self.field_output(field_value(&entity, slug)?)),
                    None => Ok(self.json(entity_detail_json(&entity))),
                }
            }
            EntityCommands::Set {
                project_id,
                entity_id,
                property_slug,
                value,
            } => {
                let result = entities
                    .set_field(project_id, entity_id, property_slug, parse_value(value))
                    .await?;
                Ok(self.json(result))
            }
            EntityCommands::Recalc {
                project_id,
                entity_id,
            } => {
                let result = entities.recalculate(project_id, entity_id).await?;
                Ok(self.json(result))
            }
            EntityCommands::Delete {
                project_id,
                entity_id,
            } => {
                entities.delete(project_id, entity_id).await?;
                Ok(self.json(json!({
                    "success": true,
                    "message": format!("Entity {} deleted", entity_id),
                })))
            }
        }
    }

    /// Structured values print as JSON, scalars print bare, null prints nothing.
    fn field_output(&self, value: Option<Value>) -> String {
        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text,
            Some(value @ (Value::Object(_) | Value::Array(_))) => self.json(value),
            Some(scalar) => scalar.to_string(),
        }
    }

    async fn handle_export(
        &self,
        project_id: &str,
        format: &str,
        name: Option<&str>,
        no_wait: bool,
    ) -> Result<String, V7Error> {
        let exports = self.client.exports();
        let mut export = exports.create(project_id, format, name, None).await?;
        info!(export_id = %export.id, status = %export.status, "Export started");

        if !no_wait {
            if self.mode.is_human() {
                eprintln!("Export started: {}. Waiting for it to complete...", export.id);
            }
            export = exports
                .with_cancellation(cancel_on_interrupt())
                .wait_for_completion(project_id, &export.id, WaitPolicy::EXPORT)
                .await?;
        }

        if self.mode.is_human() {
            return Ok(format_export_text(&export, !no_wait));
        }
        Ok(self.json(json!({
            "id": export.id,
            "status": export.status,
            "format": export.format,
            "download_url": export.download_url,
        })))
    }

    async fn handle_template(&self, command: &TemplateCommands) -> Result<String, V7Error> {
        let templates = self.client.templates();
        match command {
            TemplateCommands::Export { project_id } => {
                let template = templates.export_project(project_id).await?;
                let value = serde_json::to_value(&template)?;
                Ok(render_json(&value, OutputMode::Human))
            }
            TemplateCommands::Import {
                file,
                folder,
                no_auto_rename,
            } => {
                let template = read_template(file)?;
                let mut options = ImportOptions::default().auto_rename(!no_auto_rename);
                if let Some(folder) = folder {
                    options = options.folder(folder.as_str());
                }
                let projects = templates.import_template(&template, &options).await?;
                Ok(self.json(json!({
                    "success": true,
                    "message": format!("Imported {} project(s)", projects.len()),
                    "projects": projects
                        .iter()
                        .map(|p| json!({ "id": p.id, "name": p.name }))
                        .collect::<Vec<_>>(),
                })))
            }
        }
    }

    async fn handle_hub(&self, command: &HubCommands) -> Result<String, V7Error> {
        let hubs = self.client.hubs();
        match command {
            HubCommands::List => {
                let all = hubs.list().await?;
                if self.mode.is_human() {
                    return Ok(format_hubs_table(&all));
                }
                Ok(self.json(json!({
                    "data": all.iter().map(hub_summary_json).collect::<Vec<_>>(),
                })))
            }
            HubCommands::Get { hub_id } => {
                let hub = hubs.get(hub_id).await?;
                Ok(self.json(hub_json(&hub)))
            }
            HubCommands::Files { hub_id } => {
                let files = hubs.list_files(hub_id).await?;
                if self.mode.is_human() {
                    return Ok(format_hub_files_table(&files));
                }
                Ok(self.json(json!({
                    "data": files.iter().map(hub_file_json).collect::<Vec<_>>(),
                })))
            }
        }
    }
}

/// Token cancelled on Ctrl-C, for interruptible waits.
fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling wait");
            trigger.cancel();
        }
    });
    token
}

fn read_stdin() -> Result<String, V7Error> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| V7Error::validation(format!("Failed to read stdin: {}", e)))?;
    Ok(buf)
}

fn parse_fields(raw: &str) -> Result<Value, V7Error> {
    serde_json::from_str(raw)
        .map_err(|e| V7Error::validation(format!("Invalid JSON in --fields: {}", e)))
}

/// JSON when it parses, otherwise the raw string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn read_template(file: &str) -> Result<Template, V7Error> {
    let text = if file == "-" {
        read_stdin()?
    } else {
        std::fs::read_to_string(file).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => V7Error::validation(format!("File not found: {}", file)),
            _ => V7Error::validation(format!("Failed to read {}: {}", file, e)),
        })?
    };
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| V7Error::validation(format!("Invalid JSON: {}", e)))?;
    Template::from_record(value)
}
