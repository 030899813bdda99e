// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workflow Lifecycle Events
//!
//! Domain events published on the in-process event bus as a workflow moves
//! through its lifecycle. Consumers are observers only; nothing in the
//! manager depends on a subscriber being present.

use crate::domain::crew::CrewKind;
use crate::domain::request::{RequestId, WorkflowPriority};
use crate::domain::workflow::RejectionReason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkflowEvent {
    WorkflowReceived {
        request_id: RequestId,
        priority: WorkflowPriority,
        received_at: DateTime<Utc>,
    },
    WorkflowRejected {
        request_id: RequestId,
        reason: RejectionReason,
        rejected_at: DateTime<Utc>,
    },
    WorkflowPlanned {
        request_id: RequestId,
        step_count: usize,
        planned_at: DateTime<Utc>,
    },
    StepStarted {
        request_id: RequestId,
        crew: CrewKind,
        started_at: DateTime<Utc>,
    },
    StepSettled {
        request_id: RequestId,
        crew: CrewKind,
        succeeded: bool,
        settled_at: DateTime<Utc>,
    },
    WorkflowCompleted {
        request_id: RequestId,
        step_count: usize,
        completed_at: DateTime<Utc>,
    },
    WorkflowFailed {
        request_id: RequestId,
        error: String,
        failed_at: DateTime<Utc>,
    },
    WorkflowCancelled {
        request_id: RequestId,
        cancelled_at: DateTime<Utc>,
    },
}

impl WorkflowEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            WorkflowEvent::WorkflowReceived { request_id, .. }
            | WorkflowEvent::WorkflowRejected { request_id, .. }
            | WorkflowEvent::WorkflowPlanned { request_id, .. }
            | WorkflowEvent::StepStarted { request_id, .. }
            | WorkflowEvent::StepSettled { request_id, .. }
            | WorkflowEvent::WorkflowCompleted { request_id, .. }
            | WorkflowEvent::WorkflowFailed { request_id, .. }
            | WorkflowEvent::WorkflowCancelled { request_id, .. } => *request_id,
        }
    }
}
