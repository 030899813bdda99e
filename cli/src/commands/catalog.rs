// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! `crews agents` / `crews crews` - catalog listings.

use aegis_crews::domain::crew::CrewKind;
use aegis_crews::domain::request::WorkflowPriority;
use aegis_crews::infrastructure::registry::AgentRegistry;
use anyhow::Result;
use colored::Colorize;

/// Print the agent catalog with capabilities and specializations.
pub fn agents() -> Result<()> {
    let registry = AgentRegistry::with_builtin();

    println!("{} ({} registered)", "Agents".bold(), registry.len());
    for descriptor in registry.list() {
        let mut capabilities: Vec<&str> =
            descriptor.capabilities.iter().map(String::as_str).collect();
        capabilities.sort_unstable();
        let mut specializations: Vec<&str> = descriptor
            .specializations
            .iter()
            .map(String::as_str)
            .collect();
        specializations.sort_unstable();

        println!(
            "  {:<26} {:<13} {}",
            descriptor.kind.to_string().cyan(),
            format!("[{:?}]", descriptor.kind.category()).to_lowercase(),
            capabilities.join(", ")
        );
        if !specializations.is_empty() {
            println!(
                "  {:<26} {:<13} {}",
                "",
                "",
                format!("↳ {}", specializations.join(", ")).dimmed()
            );
        }
    }

    Ok(())
}

/// Print the composable crew kinds.
pub fn crews() -> Result<()> {
    println!("{} ({} kinds)", "Crews".bold(), CrewKind::ALL.len());
    for kind in CrewKind::ALL {
        println!(
            "  {:<26} {:<13} {}",
            kind.to_string().cyan(),
            format!("{:?}", kind.default_process()).to_lowercase(),
            kind.description()
        );
    }

    println!(
        "\n{} reactive, proactive, hybrid, scheduled",
        "Autonomous modes:".bold()
    );
    let priorities: Vec<String> = WorkflowPriority::ALL
        .iter()
        .map(|p| p.to_string())
        .collect();
    println!("{} {}", "Priorities:".bold(), priorities.join(", "));

    Ok(())
}
