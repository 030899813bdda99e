// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Agent Registry & Crew Dispatch
//!
//! Startup-populated lookup tables. Both are built once by the runtime and
//! shared read-only afterwards; neither is mutated while workflows run.
//!
//! The dispatch table is keyed by [`CrewKind`] rather than strings, so a
//! lookup can only miss when a kind was deliberately left unregistered.
//! That miss is reported as a failed step, never as a panic.

use crate::domain::agent::{AgentDescriptor, AgentKind};
use crate::domain::crew::CrewKind;
use crate::infrastructure::executor::CrewExecutor;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only catalog of agent descriptors, in declaration order.
///
/// Capability matching relies on this order for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<AgentDescriptor>,
}

impl AgentRegistry {
    /// Registry over the full built-in agent catalog.
    pub fn with_builtin() -> Self {
        Self {
            agents: AgentKind::ALL.iter().map(AgentKind::descriptor).collect(),
        }
    }

    /// Registry over an explicit subset, preserving the given order.
    pub fn with_kinds(kinds: &[AgentKind]) -> Self {
        Self {
            agents: kinds.iter().map(AgentKind::descriptor).collect(),
        }
    }

    /// Snapshot of all registered descriptors.
    pub fn list(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn get(&self, kind: AgentKind) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|a| a.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

/// Enum-keyed table of crew executors.
#[derive(Clone, Default)]
pub struct CrewDispatch {
    table: HashMap<CrewKind, Arc<dyn CrewExecutor>>,
}

impl CrewDispatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor for its own kind. Re-registering a kind replaces
    /// the previous executor.
    pub fn register(&mut self, executor: Arc<dyn CrewExecutor>) {
        self.table.insert(executor.kind(), executor);
    }

    pub fn get(&self, kind: CrewKind) -> Option<Arc<dyn CrewExecutor>> {
        self.table.get(&kind).cloned()
    }

    /// Kinds with a registered executor, in stable declaration order.
    pub fn registered(&self) -> Vec<CrewKind> {
        CrewKind::ALL
            .into_iter()
            .filter(|kind| self.table.contains_key(kind))
            .collect()
    }
}

impl std::fmt::Debug for CrewDispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrewDispatch")
            .field("registered", &self.registered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::executor::SimulatedCrewExecutor;

    #[test]
    fn builtin_registry_preserves_declaration_order() {
        let registry = AgentRegistry::with_builtin();
        assert_eq!(registry.len(), AgentKind::ALL.len());
        assert_eq!(registry.list()[0].kind, AgentKind::KnowledgeCurator);
        assert_eq!(
            registry.list().last().unwrap().kind,
            AgentKind::AudioJournalProcessor
        );
    }

    #[test]
    fn dispatch_misses_for_unregistered_kind() {
        let mut dispatch = CrewDispatch::new();
        dispatch.register(Arc::new(SimulatedCrewExecutor::new(CrewKind::CodeAnalysis)));

        assert!(dispatch.get(CrewKind::CodeAnalysis).is_some());
        assert!(dispatch.get(CrewKind::MediaProcessing).is_none());
        assert_eq!(dispatch.registered(), vec![CrewKind::CodeAnalysis]);
    }
}
