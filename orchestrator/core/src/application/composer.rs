// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crew Composer Application Service
//!
//! Dynamic crew composition: match a requested capability set against the
//! agent registry, rank the candidates, and produce a crew configuration.
//!
//! Scoring is set intersection over capability tags. Agents that contribute
//! nothing are excluded; survivors sort descending by score with ties kept
//! in registry declaration order (the sort is stable). An empty match is not
//! an error: the composer still returns a zero-agent configuration and the
//! caller decides what that means.

use crate::domain::agent::AgentDescriptor;
use crate::domain::crew::{
    estimate_duration, CompositionRequirements, CrewConfiguration, MatchedAgent,
    ResourceAllocation,
};
use crate::infrastructure::registry::AgentRegistry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub struct CrewComposer {
    registry: Arc<AgentRegistry>,
}

impl CrewComposer {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of the agent registry.
    pub fn available_agents(&self) -> &[AgentDescriptor] {
        self.registry.list()
    }

    /// Score every registered agent against the required capabilities.
    /// Returns only agents with a positive score, best first.
    pub fn match_capabilities(&self, required: &HashSet<String>) -> Vec<MatchedAgent> {
        let mut matched: Vec<MatchedAgent> = self
            .registry
            .list()
            .iter()
            .filter_map(|agent| {
                let match_score = agent
                    .capabilities
                    .iter()
                    .filter(|capability| required.contains(*capability))
                    .count();
                (match_score > 0).then(|| MatchedAgent {
                    descriptor: agent.clone(),
                    match_score,
                })
            })
            .collect();

        // Stable: ties keep registry declaration order.
        matched.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matched
    }

    /// Compose a crew configuration for the given requirements.
    pub fn compose(
        &self,
        requirements: &CompositionRequirements,
        tag: impl std::fmt::Display,
    ) -> CrewConfiguration {
        let matched = self.match_capabilities(&requirements.capabilities);
        self.build_configuration(matched, requirements, tag)
    }

    /// Truncate ranked matches to the crew-size cap and attach resource and
    /// duration estimates.
    pub fn build_configuration(
        &self,
        matched: Vec<MatchedAgent>,
        requirements: &CompositionRequirements,
        tag: impl std::fmt::Display,
    ) -> CrewConfiguration {
        let crew_size = matched.len().min(requirements.max_crew_size());
        let selected: Vec<MatchedAgent> = matched.into_iter().take(crew_size).collect();

        debug!(
            crew = %format!("dynamic-{tag}"),
            agents = selected.len(),
            "composed dynamic crew"
        );

        CrewConfiguration {
            id: format!("dynamic-{tag}"),
            resource_allocation: ResourceAllocation::for_agents(selected.len()),
            estimated_duration: estimate_duration(selected.len(), requirements.complexity()),
            process: requirements.process,
            agents: selected,
        }
    }
}
