// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # AEGIS Crews CLI
//!
//! The `crews` binary drives the autonomous crew coordination runtime from
//! the command line: submit request manifests, inspect the agent and crew
//! catalogs, and compose dynamic crews without running a workflow.
//!
//! ## Commands
//!
//! - `crews run <manifest>` - Process a CrewRequest manifest end to end
//! - `crews validate <manifest>` - Parse and validate a manifest
//! - `crews agents` - List the agent catalog with capabilities
//! - `crews crews` - List composable crew kinds
//! - `crews compose --capability <tag> ...` - Compose a dynamic crew

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;

/// AEGIS Crews - autonomous crew coordination
#[derive(Parser)]
#[command(name = "crews")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to runtime configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a CrewRequest manifest end to end
    Run {
        /// Path to the request manifest (YAML)
        manifest: PathBuf,

        /// Print lifecycle events as the workflow runs
        #[arg(long)]
        events: bool,
    },

    /// Parse and validate a request manifest without running it
    Validate {
        /// Path to the request manifest (YAML)
        manifest: PathBuf,
    },

    /// List the agent catalog
    Agents,

    /// List composable crew kinds
    Crews,

    /// Compose a dynamic crew from capability tags
    Compose {
        /// Required capability tag (repeatable)
        #[arg(long = "capability", value_name = "TAG", required = true)]
        capabilities: Vec<String>,

        /// Cap on selected agents
        #[arg(long)]
        max_size: Option<usize>,

        /// Complexity factor for the duration estimate
        #[arg(long)]
        complexity: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Run { manifest, events }) => {
            commands::run::execute(manifest, cli.config, events).await
        }
        Some(Commands::Validate { manifest }) => commands::run::validate(manifest),
        Some(Commands::Agents) => commands::catalog::agents(),
        Some(Commands::Crews) => commands::catalog::crews(),
        Some(Commands::Compose {
            capabilities,
            max_size,
            complexity,
        }) => commands::compose::execute(capabilities, max_size, complexity),
        None => {
            eprintln!("{}", "No command specified. Use --help for usage.".yellow());
            std::process::exit(1);
        }
    }
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
