// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crew Domain Model
//!
//! Types for dynamic crew composition: the closed set of composable crews,
//! the process topologies they run under, and the configuration produced by
//! capability matching.
//!
//! # Invariants
//!
//! - A `CrewConfiguration` is created per composition request and discarded
//!   after use; it is never persisted.
//! - Resource allocation is a flat share per selected agent, not a modeled
//!   cost function.

use crate::domain::agent::AgentDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Flat CPU share charged per selected agent.
pub const CPU_PER_AGENT: f64 = 0.1;

/// Flat memory share charged per selected agent.
pub const MEMORY_PER_AGENT: f64 = 0.1;

/// Baseline crew runtime in minutes before complexity/agent scaling.
pub const BASE_DURATION_MINUTES: f64 = 10.0;

/// Per-agent factor in the duration estimate. More agents parallelize work
/// but pay coordination overhead.
pub const AGENT_DURATION_FACTOR: f64 = 0.8;

/// Upper bound on crew size when a request does not specify one.
pub const DEFAULT_MAX_CREW_SIZE: usize = 5;

/// Every composable crew the platform ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewKind {
    KnowledgeCuration,
    KnowledgeWeb,
    CodeAnalysis,
    SecurityAnalysis,
    ConversationIntelligence,
    MeetingIntelligence,
    MediaProcessing,
    FloatingChat,
}

impl CrewKind {
    pub const ALL: [CrewKind; 8] = [
        CrewKind::KnowledgeCuration,
        CrewKind::KnowledgeWeb,
        CrewKind::CodeAnalysis,
        CrewKind::SecurityAnalysis,
        CrewKind::ConversationIntelligence,
        CrewKind::MeetingIntelligence,
        CrewKind::MediaProcessing,
        CrewKind::FloatingChat,
    ];

    /// Default process topology this crew runs under.
    pub fn default_process(&self) -> CrewProcess {
        match self {
            CrewKind::MeetingIntelligence | CrewKind::SecurityAnalysis => {
                CrewProcess::Hierarchical
            }
            _ => CrewProcess::Sequential,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CrewKind::KnowledgeCuration => "Curate, tag, and cross-link captured knowledge",
            CrewKind::KnowledgeWeb => "Build topic webs across the knowledge base",
            CrewKind::CodeAnalysis => "Analyze repositories for structure and insights",
            CrewKind::SecurityAnalysis => "Security-focused review of captured code",
            CrewKind::ConversationIntelligence => "Mine AI conversations for insights",
            CrewKind::MeetingIntelligence => "Distill meeting transcripts into actions",
            CrewKind::MediaProcessing => "Transcribe and analyze images, audio, video",
            CrewKind::FloatingChat => "Low-latency contextual chat over recent items",
        }
    }
}

impl std::fmt::Display for CrewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CrewKind::KnowledgeCuration => "knowledge_curation",
            CrewKind::KnowledgeWeb => "knowledge_web",
            CrewKind::CodeAnalysis => "code_analysis",
            CrewKind::SecurityAnalysis => "security_analysis",
            CrewKind::ConversationIntelligence => "conversation_intelligence",
            CrewKind::MeetingIntelligence => "meeting_intelligence",
            CrewKind::MediaProcessing => "media_processing",
            CrewKind::FloatingChat => "floating_chat",
        };
        write!(f, "{name}")
    }
}

/// How agents inside a crew coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrewProcess {
    #[default]
    Sequential,
    Hierarchical,
}

/// What a composition request asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositionRequirements {
    /// Capability tags the task needs covered.
    pub capabilities: HashSet<String>,
    /// Cap on selected agents; defaults to [`DEFAULT_MAX_CREW_SIZE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_crew_size: Option<usize>,
    /// Task complexity factor feeding the duration estimate (1.0 = nominal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<f64>,
    /// Requested process topology.
    #[serde(default)]
    pub process: CrewProcess,
}

impl CompositionRequirements {
    pub fn max_crew_size(&self) -> usize {
        self.max_crew_size.unwrap_or(DEFAULT_MAX_CREW_SIZE)
    }

    pub fn complexity(&self) -> f64 {
        self.complexity.unwrap_or(1.0)
    }
}

/// An agent selected by capability matching, with its intersection score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedAgent {
    pub descriptor: AgentDescriptor,
    /// `|required ∩ agent.capabilities|`; always > 0 for matched agents.
    pub match_score: usize,
}

/// Flat per-agent resource split for a composed crew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub cpu_per_agent: f64,
    pub memory_per_agent: f64,
    pub total_cpu: f64,
    pub total_memory: f64,
}

impl ResourceAllocation {
    pub fn for_agents(count: usize) -> Self {
        Self {
            cpu_per_agent: CPU_PER_AGENT,
            memory_per_agent: MEMORY_PER_AGENT,
            total_cpu: count as f64 * CPU_PER_AGENT,
            total_memory: count as f64 * MEMORY_PER_AGENT,
        }
    }
}

/// Output of a composition request. Ephemeral: built per request, returned
/// to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewConfiguration {
    pub id: String,
    /// Selected agents, best match first. May be empty when nothing matched;
    /// callers must check rather than rely on an error.
    pub agents: Vec<MatchedAgent>,
    pub process: CrewProcess,
    pub resource_allocation: ResourceAllocation,
    /// Formatted as `"N_minutes"`.
    pub estimated_duration: String,
}

impl CrewConfiguration {
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }
}

/// What a crew hands back after running a task. Produced behind the
/// executor seam; the coordination layer treats the payload as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewOutput {
    pub summary: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Duration heuristic: base time scaled by task complexity and a per-agent
/// coordination factor, truncated to whole minutes.
pub fn estimate_duration(agent_count: usize, complexity: f64) -> String {
    let minutes = BASE_DURATION_MINUTES * complexity * (agent_count as f64 * AGENT_DURATION_FACTOR);
    format!("{}_minutes", minutes as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_estimate_scales_with_agents_and_complexity() {
        assert_eq!(estimate_duration(2, 1.0), "16_minutes");
        assert_eq!(estimate_duration(5, 1.5), "60_minutes");
    }

    #[test]
    fn duration_estimate_handles_zero_agents() {
        assert_eq!(estimate_duration(0, 1.0), "0_minutes");
    }

    #[test]
    fn allocation_is_flat_per_agent() {
        let alloc = ResourceAllocation::for_agents(3);
        assert_eq!(alloc.total_cpu, 3.0 * CPU_PER_AGENT);
        assert_eq!(alloc.total_memory, 3.0 * MEMORY_PER_AGENT);
    }

    #[test]
    fn crew_kind_serde_round_trip() {
        for kind in CrewKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            let back: CrewKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }
}
