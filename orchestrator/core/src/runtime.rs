// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crews Runtime
//!
//! Composition root for the coordination subsystem. Everything is built
//! once, here, and handed out by reference; there are no module-level
//! singletons anywhere in the crate. Hosts construct one [`CrewRuntime`] at
//! process start and pass handles to whatever needs them.

use crate::application::composer::CrewComposer;
use crate::application::manager::WorkflowManager;
use crate::domain::budget::ResourceLimits;
use crate::domain::request::AutonomousMode;
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::executor::{CrewExecutor, SimulatedCrewExecutor};
use crate::infrastructure::registry::{AgentRegistry, CrewDispatch};
use crate::domain::crew::CrewKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Runtime configuration. Loadable from YAML; every field has a default so
/// an empty document is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub limits: ResourceLimits,
    /// Settled workflows retained for reporting (ring buffer).
    pub history_capacity: usize,
    pub mode: AutonomousMode,
    /// Event bus buffer size.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            limits: ResourceLimits::default(),
            history_capacity: 256,
            mode: AutonomousMode::default(),
            event_capacity: 1000,
        }
    }
}

impl RuntimeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to read runtime config {}", path.as_ref().display())
        })?;
        serde_yaml::from_str(&yaml).context("Failed to parse runtime config YAML")
    }
}

/// One fully wired coordination subsystem.
pub struct CrewRuntime {
    config: RuntimeConfig,
    registry: Arc<AgentRegistry>,
    manager: Arc<WorkflowManager>,
    event_bus: EventBus,
}

impl CrewRuntime {
    /// Wire a runtime with the given crew executors.
    pub fn new(config: RuntimeConfig, dispatch: CrewDispatch) -> Self {
        let registry = Arc::new(AgentRegistry::with_builtin());
        let event_bus = EventBus::new(config.event_capacity);
        let composer = Arc::new(CrewComposer::new(registry.clone()));
        let manager = Arc::new(WorkflowManager::new(
            config.limits.clone(),
            config.history_capacity,
            config.mode,
            composer,
            Arc::new(dispatch),
            event_bus.clone(),
        ));

        info!(
            mode = ?config.mode,
            history_capacity = config.history_capacity,
            "crew runtime ready"
        );

        Self {
            config,
            registry,
            manager,
            event_bus,
        }
    }

    /// Wire a runtime with simulated executors for every crew kind. Used by
    /// the CLI and smoke tests; no model access required.
    pub fn with_simulated_crews(config: RuntimeConfig) -> Self {
        let mut dispatch = CrewDispatch::new();
        for kind in CrewKind::ALL {
            let executor: Arc<dyn CrewExecutor> = Arc::new(SimulatedCrewExecutor::new(kind));
            dispatch.register(executor);
        }
        Self::new(config, dispatch)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn manager(&self) -> &Arc<WorkflowManager> {
        &self.manager
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
