// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! `crews compose` - dry-run dynamic crew composition.

use aegis_crews::application::CrewComposer;
use aegis_crews::domain::crew::CompositionRequirements;
use aegis_crews::infrastructure::registry::AgentRegistry;
use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

pub fn execute(
    capabilities: Vec<String>,
    max_size: Option<usize>,
    complexity: Option<f64>,
) -> Result<()> {
    let composer = CrewComposer::new(Arc::new(AgentRegistry::with_builtin()));
    let requirements = CompositionRequirements {
        capabilities: capabilities.into_iter().collect(),
        max_crew_size: max_size,
        complexity,
        process: Default::default(),
    };

    let config = composer.compose(&requirements, "cli");

    if config.agents.is_empty() {
        println!("{}", "No agents match the requested capabilities.".yellow());
    } else {
        println!(
            "{} {} agent(s), estimated {}",
            "Composed".green().bold(),
            config.agent_count(),
            config.estimated_duration
        );
        for agent in &config.agents {
            println!(
                "  {:<26} score {}",
                agent.descriptor.kind.to_string().cyan(),
                agent.match_score
            );
        }
    }
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
