// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Performance Reporting
//!
//! Aggregate views over the bounded workflow history: success rates, average
//! durations, and failure groupings. All computation is a pure fold over the
//! history, so there are no stored aggregates to drift out of sync.

use crate::domain::budget::{ResourceLimits, ResourcePool};
use crate::domain::request::RequestId;
use crate::domain::workflow::{WorkflowHistory, WorkflowStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One failure cluster: workflows grouped by exact error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCount {
    pub error: String,
    pub count: usize,
}

/// Aggregate performance data over the retained history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_workflows: usize,
    /// Completed / total, in `[0, 1]`. Exactly 0.0 for an empty history.
    pub success_rate: f64,
    /// Mean wall-clock seconds per settled workflow; 0.0 for empty history.
    pub average_duration_secs: f64,
    pub resource_utilization: ResourcePool,
    /// Failure clusters, most common first.
    pub common_failures: Vec<FailureCount>,
}

impl PerformanceReport {
    /// Fold the history into a report. Grouping is by exact error string,
    /// not error kind; ties in count break alphabetically for determinism.
    pub fn from_history(history: &WorkflowHistory, pool: ResourcePool) -> Self {
        let total = history.len();

        let completed = history
            .iter()
            .filter(|r| r.outcome.status() == WorkflowStatus::Completed)
            .count();
        let success_rate = if total == 0 {
            0.0
        } else {
            completed as f64 / total as f64
        };

        let average_duration_secs = if total == 0 {
            0.0
        } else {
            history.iter().map(|r| r.duration_secs).sum::<f64>() / total as f64
        };

        let mut error_counts: HashMap<&str, usize> = HashMap::new();
        for record in history.iter() {
            if let Some(error) = record.outcome.error() {
                *error_counts.entry(error).or_insert(0) += 1;
            }
        }
        let mut common_failures: Vec<FailureCount> = error_counts
            .into_iter()
            .map(|(error, count)| FailureCount {
                error: error.to_string(),
                count,
            })
            .collect();
        common_failures.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.error.cmp(&b.error)));

        Self {
            total_workflows: total,
            success_rate,
            average_duration_secs,
            resource_utilization: pool,
            common_failures,
        }
    }
}

/// One row of the paginated history listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub request_id: RequestId,
    pub status: WorkflowStatus,
    pub workflow_id: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub duration_secs: f64,
}

/// Point-in-time view of the whole coordination subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub operational: bool,
    pub performance: PerformanceReport,
    pub limits: ResourceLimits,
    pub active_workflows: usize,
    pub total_processed: usize,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workflow::{WorkflowOutcome, WorkflowRecord};

    fn push(history: &mut WorkflowHistory, outcome: WorkflowOutcome, duration_secs: f64) {
        history.push(WorkflowRecord {
            request_id: outcome.request_id(),
            plan: None,
            outcome,
            recorded_at: Utc::now(),
            duration_secs,
        });
    }

    fn completed() -> WorkflowOutcome {
        let request_id = RequestId::new();
        WorkflowOutcome::Completed {
            request_id,
            workflow_id: "wf".into(),
            results: vec![],
        }
    }

    fn failed(error: &str) -> WorkflowOutcome {
        WorkflowOutcome::Failed {
            request_id: RequestId::new(),
            error: error.into(),
        }
    }

    #[test]
    fn empty_history_reports_zeroes_not_nan() {
        let report =
            PerformanceReport::from_history(&WorkflowHistory::new(8), ResourcePool::default());
        assert_eq!(report.total_workflows, 0);
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.average_duration_secs, 0.0);
        assert!(report.common_failures.is_empty());
    }

    #[test]
    fn success_rate_counts_completed_over_total() {
        let mut history = WorkflowHistory::new(8);
        push(&mut history, completed(), 2.0);
        push(&mut history, completed(), 4.0);
        push(&mut history, failed("crew exploded"), 6.0);

        let report = PerformanceReport::from_history(&history, ResourcePool::default());
        assert_eq!(report.total_workflows, 3);
        assert!((report.success_rate - 2.0 / 3.0).abs() < 1e-9);
        assert!((report.average_duration_secs - 4.0).abs() < 1e-9);
        assert!(report.success_rate >= 0.0 && report.success_rate <= 1.0);
    }

    #[test]
    fn failures_group_by_exact_string_and_sort_by_count() {
        let mut history = WorkflowHistory::new(8);
        push(&mut history, failed("timeout"), 1.0);
        push(&mut history, failed("timeout"), 1.0);
        push(&mut history, failed("bad input"), 1.0);

        let report = PerformanceReport::from_history(&history, ResourcePool::default());
        assert_eq!(
            report.common_failures,
            vec![
                FailureCount {
                    error: "timeout".into(),
                    count: 2
                },
                FailureCount {
                    error: "bad input".into(),
                    count: 1
                },
            ]
        );
    }
}
