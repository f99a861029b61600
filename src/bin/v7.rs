//! V7 CLI Binary
//!
//! Command-line interface for the V7 Go API.

use clap::Parser;
use std::process;
use tracing::{error, info};
use v7go::cli::{load_config, map_error, Cli, OutputMode, RunContext};
use v7go::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();
    let mode = OutputMode::detect();

    // Loaded once; logging and the client share it.
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            println!("{}", map_error(&e, mode));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, config.logging);
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("v7 CLI starting");

    let context = match RunContext::new(config.client, mode) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to initialise client: {}", e);
            println!("{}", map_error(&e, mode));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            println!("{}", map_error(&e, mode));
            process::exit(1);
        }
    }
}

/// Apply logging flags over the `[logging]` table of the loaded config.
/// `--log-level` wins over `--verbose`.
fn build_logging_config(cli: &Cli, mut config: LoggingConfig) -> LoggingConfig {
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
