//! CLI argument parsing and command naming

use clap::Parser;
use v7go::cli::{command_name, Cli, Commands, EntityCommands, TemplateCommands};

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("v7").chain(args.iter().copied()))
}

#[test]
fn test_global_flags_accepted_after_subcommand() {
    let cli = parse(&["projects", "list", "--workspace", "ws-1", "--verbose"]).unwrap();

    assert_eq!(cli.workspace.as_deref(), Some("ws-1"));
    assert!(cli.verbose);
    assert_eq!(command_name(&cli.command), "projects.list");
}

#[test]
fn test_agent_builder_keeps_underscore_name() {
    let cli = parse(&["agent_builder", "create", "Extract invoice totals", "--wait"]).unwrap();

    assert_eq!(command_name(&cli.command), "agent_builder.create");
    assert!(parse(&["agent-builder", "create", "x"]).is_err());
}

#[test]
fn test_export_defaults_and_rejects_unknown_format() {
    let cli = parse(&["export", "p1"]).unwrap();
    match cli.command {
        Commands::Export {
            project_id,
            format,
            name,
            no_wait,
        } => {
            assert_eq!(project_id, "p1");
            assert_eq!(format, "csv");
            assert!(name.is_none());
            assert!(!no_wait);
        }
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(parse(&["export", "p1", "--format", "xlsx"]).is_ok());
    assert!(parse(&["export", "p1", "--format", "pdf"]).is_err());
}

#[test]
fn test_invite_role_default_and_validation() {
    let cli = parse(&["invite", "someone@example.com"]).unwrap();
    match cli.command {
        Commands::Invite { email, role } => {
            assert_eq!(email, "someone@example.com");
            assert_eq!(role, "editor");
        }
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(parse(&["invite", "someone@example.com", "-r", "reviewer"]).is_ok());
    assert!(parse(&["invite", "someone@example.com", "-r", "owner"]).is_err());
}

#[test]
fn test_entity_create_options() {
    let cli = parse(&[
        "ent",
        "create",
        "p1",
        "--fields",
        r#"{"vendor": "Acme"}"#,
        "--parent",
        "e0",
    ])
    .unwrap();

    match cli.command {
        Commands::Ent {
            command:
                EntityCommands::Create {
                    project_id,
                    fields,
                    parent_entity_id,
                },
        } => {
            assert_eq!(project_id, "p1");
            assert_eq!(fields.as_deref(), Some(r#"{"vendor": "Acme"}"#));
            assert_eq!(parent_entity_id.as_deref(), Some("e0"));
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_template_import_flags() {
    let cli = parse(&["template", "import", "-", "--no-auto-rename", "-f", "folder-1"]).unwrap();

    assert_eq!(command_name(&cli.command), "template.import");
    match cli.command {
        Commands::Template {
            command:
                TemplateCommands::Import {
                    file,
                    folder,
                    no_auto_rename,
                },
        } => {
            assert_eq!(file, "-");
            assert_eq!(folder.as_deref(), Some("folder-1"));
            assert!(no_auto_rename);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_command_names() {
    let cases = [
        (vec!["ent", "recalc", "p1", "e1"], "ent.recalc"),
        (vec!["props", "get", "p1", "vendor"], "props.get"),
        (vec!["hub", "files", "h1"], "hub.files"),
        (vec!["invite", "a@b.c"], "invite"),
        (vec!["agent_builder", "fix", "p1", "add a total"], "agent_builder.fix"),
    ];

    for (args, expected) in cases {
        let cli = parse(&args).unwrap();
        assert_eq!(command_name(&cli.command), expected);
    }
}

#[test]
fn test_missing_subcommand_is_error() {
    assert!(parse(&[]).is_err());
    assert!(parse(&["projects"]).is_err());
}
