// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Crews Application Layer
//!
//! Use-case services over the domain: crew composition, the workflow
//! manager, and performance reporting.

pub mod composer;
pub mod manager;
pub mod performance;

pub use composer::CrewComposer;
pub use manager::{CancelResult, WorkflowManager};
pub use performance::{FailureCount, HistoryEntry, PerformanceReport, SystemStatus};
