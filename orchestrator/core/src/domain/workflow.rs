// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workflow Lifecycle Model
//!
//! Plans, step results, the discriminated workflow outcome, and the bounded
//! execution history.
//!
//! Every path out of the manager is a [`WorkflowOutcome`] variant: admission
//! rejection, execution failure, cancellation, and success share one tagged
//! type instead of loosely shaped status maps. Nothing downstream of the
//! manager distinguishes outcomes by anything other than this tag.
//!
//! State machine per request:
//!
//! ```text
//! received → rejected
//!          → planned → executing → completed
//!                                → failed
//!                                → cancelled
//! ```

use crate::domain::crew::{CrewConfiguration, CrewKind, CrewOutput, ResourceAllocation};
use crate::domain::request::RequestId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lifecycle states of a workflow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Received,
    Planned,
    Executing,
    Completed,
    Failed,
    Rejected,
    Cancelled,
}

/// Why a request was turned away at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InsufficientResources,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::InsufficientResources => write!(f, "insufficient_resources"),
        }
    }
}

/// Deterministic analysis of an incoming request, produced before planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestAnalysis {
    pub complexity: f64,
    pub required_crews: Vec<CrewKind>,
    /// Formatted as `"N_minutes"`.
    pub estimated_duration: String,
}

/// One planned execution step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedStep {
    pub crew: CrewKind,
    pub task: String,
    #[serde(default)]
    pub inputs: serde_json::Value,
}

/// Full execution plan for an admitted request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowPlan {
    pub workflow_id: String,
    pub analysis: RequestAnalysis,
    pub steps: Vec<PlannedStep>,
    pub resource_allocation: ResourceAllocation,
    /// Present when the request asked for dynamic crew composition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crew_config: Option<CrewConfiguration>,
}

/// Result of one executed step. A step failure is data, not an error: the
/// workflow keeps going and the failure lands in the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub crew: CrewKind,
    pub task: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Completed { output: CrewOutput },
    Failed { error: String },
}

impl StepResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, StepOutcome::Completed { .. })
    }
}

/// Terminal result of `process_request`. Serializes with a `status` tag so
/// callers downstream see the same shape for every terminal state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    Rejected {
        request_id: RequestId,
        reason: RejectionReason,
    },
    Completed {
        request_id: RequestId,
        workflow_id: String,
        results: Vec<StepResult>,
    },
    Failed {
        request_id: RequestId,
        error: String,
    },
    Cancelled {
        request_id: RequestId,
    },
}

impl WorkflowOutcome {
    pub fn request_id(&self) -> RequestId {
        match self {
            WorkflowOutcome::Rejected { request_id, .. }
            | WorkflowOutcome::Completed { request_id, .. }
            | WorkflowOutcome::Failed { request_id, .. }
            | WorkflowOutcome::Cancelled { request_id } => *request_id,
        }
    }

    pub fn status(&self) -> WorkflowStatus {
        match self {
            WorkflowOutcome::Rejected { .. } => WorkflowStatus::Rejected,
            WorkflowOutcome::Completed { .. } => WorkflowStatus::Completed,
            WorkflowOutcome::Failed { .. } => WorkflowStatus::Failed,
            WorkflowOutcome::Cancelled { .. } => WorkflowStatus::Cancelled,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed { .. })
    }

    /// Failure message, when this outcome carries one.
    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowOutcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// One settled workflow, as retained in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    pub request_id: RequestId,
    pub plan: Option<WorkflowPlan>,
    pub outcome: WorkflowOutcome,
    pub recorded_at: DateTime<Utc>,
    /// Wall-clock execution time in seconds.
    pub duration_secs: f64,
}

/// Append-only, capacity-bounded record of settled workflows.
///
/// The ring evicts the oldest record once `capacity` is reached, keeping
/// memory flat over process lifetime. Records are stored oldest-first.
#[derive(Debug, Clone)]
pub struct WorkflowHistory {
    records: VecDeque<WorkflowRecord>,
    capacity: usize,
}

impl WorkflowHistory {
    /// `capacity` of zero is treated as one: a history that retains nothing
    /// would make every aggregate report vacuous.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, record: WorkflowRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowRecord> {
        self.records.iter()
    }

    /// Oldest-first page of records.
    pub fn page(&self, limit: usize, offset: usize) -> Vec<&WorkflowRecord> {
        self.records.iter().skip(offset).take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u128, outcome: WorkflowOutcome) -> WorkflowRecord {
        WorkflowRecord {
            request_id: RequestId::from_uuid(uuid::Uuid::from_u128(n)),
            plan: None,
            outcome,
            recorded_at: Utc::now(),
            duration_secs: 1.0,
        }
    }

    fn completed(n: u128) -> WorkflowRecord {
        let id = RequestId::from_uuid(uuid::Uuid::from_u128(n));
        record(
            n,
            WorkflowOutcome::Completed {
                request_id: id,
                workflow_id: format!("wf-{n}"),
                results: vec![],
            },
        )
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = WorkflowOutcome::Rejected {
            request_id: RequestId::new(),
            reason: RejectionReason::InsufficientResources,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "insufficient_resources");
    }

    #[test]
    fn history_evicts_oldest_past_capacity() {
        let mut history = WorkflowHistory::new(3);
        for n in 0..5u128 {
            history.push(completed(n));
        }
        assert_eq!(history.len(), 3);
        let first = history.iter().next().unwrap();
        assert_eq!(
            first.request_id,
            RequestId::from_uuid(uuid::Uuid::from_u128(2))
        );
    }

    #[test]
    fn history_page_respects_limit_and_offset() {
        let mut history = WorkflowHistory::new(10);
        for n in 0..6u128 {
            history.push(completed(n));
        }
        let page = history.page(2, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(
            page[0].request_id,
            RequestId::from_uuid(uuid::Uuid::from_u128(3))
        );
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut history = WorkflowHistory::new(0);
        history.push(completed(1));
        assert_eq!(history.len(), 1);
    }
}
