// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workflow Requests
//!
//! Inbound request types for the autonomous workflow manager, plus the
//! domain errors raised while validating externally supplied requests.

use crate::domain::budget::ResourceRequirements;
use crate::domain::crew::{CompositionRequirements, CrewKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Autonomous operation modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutonomousMode {
    /// React to user inputs.
    Reactive,
    /// Self-initiated workflows.
    Proactive,
    /// Both reactive and proactive.
    #[default]
    Hybrid,
    /// Time-based execution.
    Scheduled,
}

/// Workflow priority levels. Priority feeds the complexity factor used in
/// duration estimates; it does not preempt admitted workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowPriority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl WorkflowPriority {
    pub const ALL: [WorkflowPriority; 4] = [
        WorkflowPriority::Critical,
        WorkflowPriority::High,
        WorkflowPriority::Medium,
        WorkflowPriority::Low,
    ];

    /// Complexity multiplier applied when the request carries no explicit
    /// complexity of its own.
    pub fn complexity_factor(&self) -> f64 {
        match self {
            WorkflowPriority::Critical => 2.0,
            WorkflowPriority::High => 1.5,
            WorkflowPriority::Medium => 1.0,
            WorkflowPriority::Low => 0.8,
        }
    }
}

impl std::fmt::Display for WorkflowPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkflowPriority::Critical => "critical",
            WorkflowPriority::High => "high",
            WorkflowPriority::Medium => "medium",
            WorkflowPriority::Low => "low",
        };
        write!(f, "{name}")
    }
}

/// One explicitly requested pipeline step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    pub crew: CrewKind,
    pub task: String,
    #[serde(default)]
    pub inputs: serde_json::Value,
}

/// A workflow request as accepted by `WorkflowManager::process_request`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRequest {
    pub id: RequestId,
    /// What the requester wants accomplished.
    pub goal: String,
    /// Free-form context forwarded to crew executors.
    #[serde(default)]
    pub context: serde_json::Value,
    #[serde(default)]
    pub priority: WorkflowPriority,
    #[serde(default)]
    pub resources: ResourceRequirements,
    /// When present, the manager composes a dynamic crew for the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<CompositionRequirements>,
    /// Explicit step pipeline. Empty means the manager plans the default
    /// curation chain.
    #[serde(default)]
    pub pipeline: Vec<PipelineStep>,
}

impl WorkflowRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            goal: goal.into(),
            context: serde_json::Value::Null,
            priority: WorkflowPriority::default(),
            resources: ResourceRequirements::default(),
            composition: None,
            pipeline: Vec::new(),
        }
    }

    /// Effective complexity: explicit composition complexity wins, else the
    /// priority-derived factor.
    pub fn complexity(&self) -> f64 {
        self.composition
            .as_ref()
            .and_then(|c| c.complexity)
            .unwrap_or_else(|| self.priority.complexity_factor())
    }
}

/// Validation errors for externally supplied requests and manifests.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid API version: expected '100monkeys.ai/v1', got '{0}'")]
    InvalidApiVersion(String),

    #[error("Invalid kind: expected 'CrewRequest', got '{0}'")]
    InvalidKind(String),

    #[error("Request goal cannot be empty")]
    EmptyGoal,

    #[error("Invalid resource requirement: {0}")]
    InvalidResources(String),

    #[error("Failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
