// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crew Executor Seam
//!
//! The boundary behind which actual crew work happens. Executors are black
//! boxes to the coordination layer: the manager hands them a task string and
//! inputs, and gets back an output or an error. LLM-backed executors live
//! outside this crate; the shipped [`SimulatedCrewExecutor`] produces
//! deterministic output for demos and local runs.

use crate::domain::crew::{CrewKind, CrewOutput, CrewProcess};
use anyhow::Result;
use async_trait::async_trait;

/// A runnable crew. Implementations must be cheap to share (`Arc`) and are
/// invoked sequentially by the workflow manager.
///
/// An `Err` from `kickoff` is the exception path: the manager normalizes it
/// into a failed workflow outcome rather than letting it propagate.
#[async_trait]
pub trait CrewExecutor: Send + Sync {
    /// The crew kind this executor serves.
    fn kind(&self) -> CrewKind;

    /// Process topology the crew runs under.
    fn process(&self) -> CrewProcess {
        self.kind().default_process()
    }

    /// Run the crew against a task.
    async fn kickoff(&self, task: &str, inputs: &serde_json::Value) -> Result<CrewOutput>;
}

/// Deterministic stand-in executor. Echoes the task back with the crew kind
/// so demos and smoke runs need no model access.
#[derive(Debug, Clone)]
pub struct SimulatedCrewExecutor {
    kind: CrewKind,
}

impl SimulatedCrewExecutor {
    pub fn new(kind: CrewKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl CrewExecutor for SimulatedCrewExecutor {
    fn kind(&self) -> CrewKind {
        self.kind
    }

    async fn kickoff(&self, task: &str, inputs: &serde_json::Value) -> Result<CrewOutput> {
        // Yield once so simulated runs interleave like real async executors.
        tokio::task::yield_now().await;
        Ok(CrewOutput {
            summary: format!("{} handled '{task}'", self.kind),
            data: serde_json::json!({
                "crew": self.kind,
                "task": task,
                "inputs": inputs,
                "simulated": true,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_executor_echoes_task() {
        let executor = SimulatedCrewExecutor::new(CrewKind::KnowledgeCuration);
        let output = executor
            .kickoff("curate_knowledge", &serde_json::json!({"item": 1}))
            .await
            .unwrap();
        assert!(output.summary.contains("curate_knowledge"));
        assert_eq!(output.data["simulated"], true);
    }
}
