//! Integration tests for capability-matched crew composition.

use aegis_crews::application::CrewComposer;
use aegis_crews::domain::agent::AgentKind;
use aegis_crews::domain::crew::{CompositionRequirements, CrewProcess};
use aegis_crews::infrastructure::registry::AgentRegistry;
use std::collections::HashSet;
use std::sync::Arc;

fn caps(tags: &[&str]) -> HashSet<String> {
    tags.iter().map(|s| s.to_string()).collect()
}

#[test]
fn two_capability_requirement_ranks_double_matches_first() {
    // Three agents: one covering both tags, one covering one, one covering
    // neither. Expected ranking: [double (2), single (1)], third excluded.
    let registry = AgentRegistry::with_kinds(&[
        AgentKind::SecurityAnalyst,  // code_review + risk_assessment → 2
        AgentKind::CodeAnalyst,      // code_review → 1
        AgentKind::VideoProcessor,   // neither → excluded
    ]);
    let composer = CrewComposer::new(Arc::new(registry));

    let matched = composer.match_capabilities(&caps(&["code_review", "risk_assessment"]));

    assert_eq!(matched.len(), 2);
    assert_eq!(matched[0].descriptor.kind, AgentKind::SecurityAnalyst);
    assert_eq!(matched[0].match_score, 2);
    assert_eq!(matched[1].descriptor.kind, AgentKind::CodeAnalyst);
    assert_eq!(matched[1].match_score, 1);
}

#[test]
fn composed_configuration_carries_allocation_and_duration() {
    let composer = CrewComposer::new(Arc::new(AgentRegistry::with_builtin()));
    let requirements = CompositionRequirements {
        capabilities: caps(&["summarization"]),
        max_crew_size: Some(2),
        complexity: Some(1.5),
        process: CrewProcess::Hierarchical,
    };

    let config = composer.compose(&requirements, "it-1");

    assert_eq!(config.id, "dynamic-it-1");
    assert_eq!(config.agent_count(), 2);
    assert_eq!(config.process, CrewProcess::Hierarchical);
    assert_eq!(config.resource_allocation.cpu_per_agent, 0.1);
    assert_eq!(config.resource_allocation.total_memory, 0.2);
    // 10 min base × 1.5 complexity × (2 agents × 0.8) = 24 minutes.
    assert_eq!(config.estimated_duration, "24_minutes");
}

#[test]
fn composer_snapshot_matches_registry() {
    let registry = Arc::new(AgentRegistry::with_builtin());
    let composer = CrewComposer::new(registry.clone());

    assert_eq!(composer.available_agents().len(), registry.len());
    assert_eq!(
        composer.available_agents()[0].kind,
        AgentKind::KnowledgeCurator
    );
}

#[test]
fn unmatched_requirement_composes_an_empty_crew() {
    let composer = CrewComposer::new(Arc::new(AgentRegistry::with_builtin()));
    let requirements = CompositionRequirements {
        capabilities: caps(&["interpretive_dance"]),
        ..Default::default()
    };

    let config = composer.compose(&requirements, "it-2");

    // Not an error: callers check for the empty crew themselves.
    assert_eq!(config.agent_count(), 0);
    assert_eq!(config.resource_allocation.total_cpu, 0.0);
    assert_eq!(config.estimated_duration, "0_minutes");
}
