// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `aegis-crews-core` — Autonomous Crew Coordination
//!
//! Budget-gated admission, capability-matched crew composition, and
//! sequential workflow execution with bounded outcome history.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | Budget, agent/crew catalogs, requests, outcomes |
//! | [`application`] | Application | `WorkflowManager`, `CrewComposer`, reports |
//! | [`infrastructure`] | Infrastructure | Executor seam, registries, event bus, parser |
//! | [`runtime`] | Composition | `CrewRuntime` root, `RuntimeConfig` |
//!
//! ## Key Concepts
//!
//! - **Crew**: a named, composable group of agents executed together toward
//!   a task.
//! - **Capability**: a string tag describing what an agent can contribute;
//!   matching is set-intersection, not semantic.
//! - **Admission**: the additive-counter budget gate in front of execution.
//!   Rejected requests are dropped, never queued.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod runtime;

pub use domain::*;
