// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! `crews run` / `crews validate` - process or check a request manifest.

use aegis_crews::domain::workflow::WorkflowOutcome;
use aegis_crews::infrastructure::request_parser::RequestParser;
use aegis_crews::runtime::{CrewRuntime, RuntimeConfig};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Run a manifest through an embedded runtime with simulated crews.
pub async fn execute(manifest: PathBuf, config: Option<PathBuf>, events: bool) -> Result<()> {
    let request = RequestParser::parse_file(&manifest)
        .with_context(|| format!("Failed to parse manifest {}", manifest.display()))?;

    let config = match config {
        Some(path) => RuntimeConfig::from_file(path)?,
        None => RuntimeConfig::default(),
    };
    let runtime = CrewRuntime::with_simulated_crews(config);

    println!(
        "{} {} ({})",
        "Submitting".bold(),
        request.goal.cyan(),
        request.id
    );

    let watcher = events.then(|| {
        let mut receiver = runtime.event_bus().subscribe_request(request.id);
        tokio::spawn(async move {
            while let Ok(event) = receiver.recv().await {
                let line = serde_json::to_string(&event).unwrap_or_default();
                println!("  {} {line}", "event".dimmed());
            }
        })
    });

    let outcome = runtime.manager().process_request(request).await;

    if let Some(handle) = watcher {
        handle.abort();
    }

    match &outcome {
        WorkflowOutcome::Completed { results, .. } => {
            println!("{} {} step(s)", "Completed:".green().bold(), results.len());
        }
        WorkflowOutcome::Rejected { reason, .. } => {
            println!("{} {reason}", "Rejected:".yellow().bold());
        }
        WorkflowOutcome::Failed { error, .. } => {
            println!("{} {error}", "Failed:".red().bold());
        }
        WorkflowOutcome::Cancelled { .. } => {
            println!("{}", "Cancelled".yellow().bold());
        }
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    let report = runtime.manager().collect_performance_data();
    println!(
        "{} total={} success_rate={:.2} avg_duration={:.3}s",
        "Performance:".bold(),
        report.total_workflows,
        report.success_rate,
        report.average_duration_secs
    );

    Ok(())
}

/// Parse a manifest and report what it would do, without running it.
pub fn validate(manifest: PathBuf) -> Result<()> {
    match RequestParser::parse_file(&manifest) {
        Ok(request) => {
            println!("{} {}", "Valid:".green().bold(), manifest.display());
            println!("  goal:     {}", request.goal);
            println!("  priority: {}", request.priority);
            println!(
                "  pipeline: {}",
                if request.pipeline.is_empty() {
                    "default chain".to_string()
                } else {
                    request
                        .pipeline
                        .iter()
                        .map(|s| s.crew.to_string())
                        .collect::<Vec<_>>()
                        .join(" → ")
                }
            );
            if let Some(composition) = &request.composition {
                let mut tags: Vec<&str> =
                    composition.capabilities.iter().map(String::as_str).collect();
                tags.sort_unstable();
                println!("  capabilities: {}", tags.join(", "));
            }
            Ok(())
        }
        Err(error) => {
            println!("{} {error}", "Invalid:".red().bold());
            std::process::exit(1);
        }
    }
}
