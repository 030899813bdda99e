// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Workflow Manager Application Service
//!
//! Single entry point tying budget admission, crew composition, step
//! execution, and outcome bookkeeping together.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Orchestrate the request lifecycle (admit → plan → execute)
//! - **Dependencies:** Domain (budget, workflow), Infrastructure (dispatch,
//!   event bus)
//!
//! # Request lifecycle
//!
//! ```text
//! process_request(request)
//!     ├── allocate budget        → Rejected (no mutation, no history)
//!     ├── plan (compose dynamic crew when requested)
//!     ├── execute steps sequentially
//!     │       dispatch miss  → failed StepResult, keep going
//!     │       executor error → Failed (normalized to a string)
//!     │       cancel flag    → Cancelled
//!     └── release budget, record history, publish events
//! ```
//!
//! All budget mutation happens under one mutex, so admission is a single
//! atomic check-and-allocate: two concurrent requests can no longer both
//! pass the availability check before either allocates. Rejection is still
//! instantaneous; there is no queueing and no waiting for capacity.
//!
//! Nothing propagates past `process_request`: executor errors are caught and
//! normalized into [`WorkflowOutcome::Failed`], so callers branch on the
//! outcome tag and never see a panic or an error type from this seam.

use crate::application::composer::CrewComposer;
use crate::application::performance::{HistoryEntry, PerformanceReport, SystemStatus};
use crate::domain::budget::{ResourceBudget, ResourceLimits, ResourcePool};
use crate::domain::crew::{estimate_duration, CrewKind, ResourceAllocation};
use crate::domain::events::WorkflowEvent;
use crate::domain::request::{AutonomousMode, RequestId, WorkflowRequest};
use crate::domain::workflow::{
    PlannedStep, RejectionReason, RequestAnalysis, StepOutcome, StepResult, WorkflowHistory,
    WorkflowOutcome, WorkflowPlan, WorkflowRecord,
};
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::registry::CrewDispatch;
use chrono::Utc;
use metrics::{counter, gauge};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Fallback step chain when a request carries no explicit pipeline.
const DEFAULT_CHAIN: [(CrewKind, &str); 2] = [
    (CrewKind::KnowledgeCuration, "curate_knowledge"),
    (CrewKind::CodeAnalysis, "analyze_code"),
];

/// Result of a cancellation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelResult {
    /// The workflow was active; it will stop before its next step.
    Cancelling,
    /// Unknown request, or it already settled.
    NotFound,
}

#[derive(Debug)]
struct ActiveWorkflow {
    cancel_requested: bool,
}

/// Central coordinator for autonomous workflows.
pub struct WorkflowManager {
    budget: Mutex<ResourceBudget>,
    composer: Arc<CrewComposer>,
    dispatch: Arc<CrewDispatch>,
    event_bus: EventBus,
    history: RwLock<WorkflowHistory>,
    active: RwLock<HashMap<RequestId, ActiveWorkflow>>,
    mode: AutonomousMode,
}

impl WorkflowManager {
    pub fn new(
        limits: ResourceLimits,
        history_capacity: usize,
        mode: AutonomousMode,
        composer: Arc<CrewComposer>,
        dispatch: Arc<CrewDispatch>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            budget: Mutex::new(ResourceBudget::new(limits)),
            composer,
            dispatch,
            event_bus,
            history: RwLock::new(WorkflowHistory::new(history_capacity)),
            active: RwLock::new(HashMap::new()),
            mode,
        }
    }

    pub fn mode(&self) -> AutonomousMode {
        self.mode
    }

    /// Current pool snapshot.
    pub fn pool(&self) -> ResourcePool {
        self.budget.lock().pool().clone()
    }

    pub fn limits(&self) -> ResourceLimits {
        self.budget.lock().limits().clone()
    }

    pub fn active_count(&self) -> usize {
        self.active.read().len()
    }

    /// Process a request end to end. Never returns an error: every failure
    /// mode is a [`WorkflowOutcome`] variant.
    pub async fn process_request(&self, request: WorkflowRequest) -> WorkflowOutcome {
        let started = Instant::now();
        counter!("crews_requests_total").increment(1);
        info!(
            request_id = %request.id,
            priority = %request.priority,
            goal = %request.goal,
            "processing workflow request"
        );
        self.event_bus.publish(WorkflowEvent::WorkflowReceived {
            request_id: request.id,
            priority: request.priority,
            received_at: Utc::now(),
        });

        // Atomic admission: check and allocate under one lock.
        let admitted = self.budget.lock().allocate(&request.resources);
        if !admitted {
            counter!("crews_rejected_total").increment(1);
            info!(request_id = %request.id, "rejected: insufficient resources");
            self.event_bus.publish(WorkflowEvent::WorkflowRejected {
                request_id: request.id,
                reason: RejectionReason::InsufficientResources,
                rejected_at: Utc::now(),
            });
            return WorkflowOutcome::Rejected {
                request_id: request.id,
                reason: RejectionReason::InsufficientResources,
            };
        }
        self.update_pool_gauges();
        self.active.write().insert(
            request.id,
            ActiveWorkflow {
                cancel_requested: false,
            },
        );

        let plan = self.plan(&request);
        self.event_bus.publish(WorkflowEvent::WorkflowPlanned {
            request_id: request.id,
            step_count: plan.steps.len(),
            planned_at: Utc::now(),
        });

        let outcome = self.execute(&request, &plan).await;

        // Teardown: the admitted resources release exactly once, here.
        self.budget.lock().release(&request.resources);
        self.update_pool_gauges();
        self.active.write().remove(&request.id);

        let duration_secs = started.elapsed().as_secs_f64();
        self.history.write().push(WorkflowRecord {
            request_id: request.id,
            plan: Some(plan),
            outcome: outcome.clone(),
            recorded_at: Utc::now(),
            duration_secs,
        });
        self.settle(&outcome, duration_secs);

        outcome
    }

    /// Flag an active workflow for cancellation. The execution loop observes
    /// the flag between steps; resources are released by the normal teardown
    /// path, never here (a direct release would double-count).
    pub fn cancel(&self, request_id: RequestId) -> CancelResult {
        let mut active = self.active.write();
        match active.get_mut(&request_id) {
            Some(workflow) => {
                workflow.cancel_requested = true;
                info!(request_id = %request_id, "cancellation requested");
                CancelResult::Cancelling
            }
            None => CancelResult::NotFound,
        }
    }

    /// Aggregate performance data over the retained history.
    pub fn collect_performance_data(&self) -> PerformanceReport {
        PerformanceReport::from_history(&self.history.read(), self.pool())
    }

    /// Paginated history listing, oldest first.
    pub fn history_page(&self, limit: usize, offset: usize) -> Vec<HistoryEntry> {
        self.history
            .read()
            .page(limit, offset)
            .into_iter()
            .map(|record| HistoryEntry {
                request_id: record.request_id,
                status: record.outcome.status(),
                workflow_id: record
                    .plan
                    .as_ref()
                    .map(|plan| plan.workflow_id.clone()),
                recorded_at: record.recorded_at,
                duration_secs: record.duration_secs,
            })
            .collect()
    }

    /// Point-in-time system report.
    pub fn system_status(&self) -> SystemStatus {
        let performance = self.collect_performance_data();
        SystemStatus {
            operational: true,
            total_processed: performance.total_workflows,
            performance,
            limits: self.limits(),
            active_workflows: self.active_count(),
            generated_at: Utc::now(),
        }
    }

    // ========================================================================
    // Planning
    // ========================================================================

    fn plan(&self, request: &WorkflowRequest) -> WorkflowPlan {
        let crew_config = request
            .composition
            .as_ref()
            .map(|requirements| self.composer.compose(requirements, request.id));

        let steps: Vec<PlannedStep> = if request.pipeline.is_empty() {
            DEFAULT_CHAIN
                .iter()
                .map(|(crew, task)| PlannedStep {
                    crew: *crew,
                    task: (*task).to_string(),
                    inputs: request.context.clone(),
                })
                .collect()
        } else {
            request
                .pipeline
                .iter()
                .map(|step| PlannedStep {
                    crew: step.crew,
                    task: step.task.clone(),
                    inputs: step.inputs.clone(),
                })
                .collect()
        };

        let mut required_crews: Vec<CrewKind> = Vec::new();
        for step in &steps {
            if !required_crews.contains(&step.crew) {
                required_crews.push(step.crew);
            }
        }

        let complexity = request.complexity();
        let worker_count = crew_config
            .as_ref()
            .map(|config| config.agent_count())
            .unwrap_or_else(|| request.resources.agents() as usize);
        let resource_allocation = crew_config
            .as_ref()
            .map(|config| config.resource_allocation.clone())
            .unwrap_or_else(|| ResourceAllocation::for_agents(worker_count));

        debug!(
            request_id = %request.id,
            steps = steps.len(),
            dynamic_crew = crew_config.is_some(),
            "planned workflow"
        );

        WorkflowPlan {
            workflow_id: format!("autonomous-{}", request.id),
            analysis: RequestAnalysis {
                complexity,
                required_crews,
                estimated_duration: estimate_duration(worker_count, complexity),
            },
            steps,
            resource_allocation,
            crew_config,
        }
    }

    // ========================================================================
    // Execution
    // ========================================================================

    async fn execute(&self, request: &WorkflowRequest, plan: &WorkflowPlan) -> WorkflowOutcome {
        let mut results = Vec::with_capacity(plan.steps.len());

        for step in &plan.steps {
            if self.cancel_requested(request.id) {
                info!(request_id = %request.id, "stopping before next step: cancelled");
                return WorkflowOutcome::Cancelled {
                    request_id: request.id,
                };
            }

            self.event_bus.publish(WorkflowEvent::StepStarted {
                request_id: request.id,
                crew: step.crew,
                started_at: Utc::now(),
            });

            match self.execute_step(step).await {
                Ok(result) => {
                    self.event_bus.publish(WorkflowEvent::StepSettled {
                        request_id: request.id,
                        crew: step.crew,
                        succeeded: result.succeeded(),
                        settled_at: Utc::now(),
                    });
                    results.push(result);
                }
                Err(error) => {
                    // The exception path: normalize and stop. The error
                    // becomes a string here; the type is gone by design.
                    warn!(
                        request_id = %request.id,
                        crew = %step.crew,
                        error = %error,
                        "step execution failed"
                    );
                    return WorkflowOutcome::Failed {
                        request_id: request.id,
                        error: error.to_string(),
                    };
                }
            }
        }

        WorkflowOutcome::Completed {
            request_id: request.id,
            workflow_id: plan.workflow_id.clone(),
            results,
        }
    }

    /// Run one step. A dispatch miss is a failed result, not an error; only
    /// executor errors bubble up to abort the workflow.
    async fn execute_step(&self, step: &PlannedStep) -> anyhow::Result<StepResult> {
        let Some(executor) = self.dispatch.get(step.crew) else {
            return Ok(StepResult {
                crew: step.crew,
                task: step.task.clone(),
                outcome: StepOutcome::Failed {
                    error: format!("No executor registered for crew '{}'", step.crew),
                },
            });
        };

        let output = executor.kickoff(&step.task, &step.inputs).await?;
        Ok(StepResult {
            crew: step.crew,
            task: step.task.clone(),
            outcome: StepOutcome::Completed { output },
        })
    }

    fn cancel_requested(&self, request_id: RequestId) -> bool {
        self.active
            .read()
            .get(&request_id)
            .map(|workflow| workflow.cancel_requested)
            .unwrap_or(false)
    }

    fn settle(&self, outcome: &WorkflowOutcome, duration_secs: f64) {
        match outcome {
            WorkflowOutcome::Completed { request_id, results, .. } => {
                counter!("crews_completed_total").increment(1);
                info!(
                    request_id = %request_id,
                    steps = results.len(),
                    duration_secs,
                    "workflow completed"
                );
                self.event_bus.publish(WorkflowEvent::WorkflowCompleted {
                    request_id: *request_id,
                    step_count: results.len(),
                    completed_at: Utc::now(),
                });
            }
            WorkflowOutcome::Failed { request_id, error } => {
                counter!("crews_failed_total").increment(1);
                warn!(request_id = %request_id, error = %error, "workflow failed");
                self.event_bus.publish(WorkflowEvent::WorkflowFailed {
                    request_id: *request_id,
                    error: error.clone(),
                    failed_at: Utc::now(),
                });
            }
            WorkflowOutcome::Cancelled { request_id } => {
                counter!("crews_cancelled_total").increment(1);
                self.event_bus.publish(WorkflowEvent::WorkflowCancelled {
                    request_id: *request_id,
                    cancelled_at: Utc::now(),
                });
            }
            // Rejections settle before execution and never reach here.
            WorkflowOutcome::Rejected { .. } => {}
        }
    }

    fn update_pool_gauges(&self) {
        let pool = self.pool();
        gauge!("crews_cpu_usage").set(pool.cpu_usage);
        gauge!("crews_memory_usage").set(pool.memory_usage);
        gauge!("crews_active_agents").set(pool.active_agents as f64);
        gauge!("crews_concurrent").set(pool.concurrent_crews as f64);
    }
}
