//! Replconf CLI Binary
//!
//! Applies a node descriptor to each node's configuration files.

use anyhow::Context;
use clap::Parser;
use replconf::cli::{exit_code, format_run_report, map_error, Cli, ExitStatus, RunContext};
use replconf::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let logging_config = build_logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging_config)).context("Failed to initialize logging") {
        eprintln!("{:#}", e);
        process::exit(ExitStatus::Usage.code());
    }

    info!("Welcome to replconf {}", env!("CARGO_PKG_VERSION"));

    let context = match RunContext::new(cli.descriptor.clone(), cli.dry_run) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{}", map_error(&e));
            info!("Exiting...");
            process::exit(exit_code(&e).code());
        }
    };

    let report = match context.execute() {
        Ok(report) => report,
        Err(e) => {
            error!("{}", map_error(&e));
            info!("Exiting...");
            process::exit(exit_code(&e).code());
        }
    };

    match format_run_report(&report, &cli.format) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            error!("Failed to format summary: {}", e);
            process::exit(ExitStatus::Usage.code());
        }
    }
    info!("All configuration files updated");
}

/// Build logging configuration from CLI args.
/// Explicit flags override --verbose, which overrides defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = LoggingConfig::default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if cli.format == "json" && cli.log_output.is_none() {
        // Keep stdout clean for the JSON summary.
        config.output = "stderr".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    config
}
