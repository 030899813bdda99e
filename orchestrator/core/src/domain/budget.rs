// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Resource Budget
//!
//! Additive-counter admission control for autonomous crew workflows.
//!
//! The budget is pure bookkeeping: counters track how much of the configured
//! ceiling is notionally in use, disconnected from actual OS-level resource
//! consumption. Callers that need serialized mutation wrap the budget in a
//! mutex (see `application::manager`); the domain type itself holds no locks.

use serde::{Deserialize, Serialize};

/// Fraction of the CPU ceiling assumed when a request omits `cpu`.
pub const DEFAULT_CPU_SHARE: f64 = 0.1;

/// Fraction of the memory ceiling assumed when a request omits `memory`.
pub const DEFAULT_MEMORY_SHARE: f64 = 0.1;

/// Agent slots assumed when a request omits `agents`.
pub const DEFAULT_AGENT_SLOTS: u32 = 1;

/// Current usage snapshot. Counters move only through [`ResourceBudget::allocate`]
/// and [`ResourceBudget::release`] and never go negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    /// CPU share in use, in `[0, 1]`.
    pub cpu_usage: f64,
    /// Memory share in use, in `[0, 1]`.
    pub memory_usage: f64,
    /// Agent slots currently held by admitted workflows.
    pub active_agents: u32,
    /// Admitted workflows currently executing (one crew each).
    pub concurrent_crews: u32,
}

/// Static ceiling configured once at construction. Immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub max_cpu: f64,
    pub max_memory: f64,
    pub max_agents: u32,
    pub max_crews: u32,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_cpu: 0.8,
            max_memory: 0.8,
            max_agents: 10,
            max_crews: 5,
        }
    }
}

/// Resource ask attached to an incoming workflow request.
///
/// Unspecified fields fall back to the default shares above, so an empty
/// requirement still costs a nominal slice of the budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agents: Option<u32>,
}

impl ResourceRequirements {
    pub fn cpu(&self) -> f64 {
        self.cpu.unwrap_or(DEFAULT_CPU_SHARE)
    }

    pub fn memory(&self) -> f64 {
        self.memory.unwrap_or(DEFAULT_MEMORY_SHARE)
    }

    pub fn agents(&self) -> u32 {
        self.agents.unwrap_or(DEFAULT_AGENT_SLOTS)
    }
}

/// Gate-keeper for workflow admission.
///
/// # Invariants
///
/// - `pool.cpu_usage + req.cpu <= limits.max_cpu` holds before an allocation
///   succeeds; same for memory.
/// - No counter goes below zero, even across mismatched allocate/release
///   pairs (excess releases are absorbed by clamping).
#[derive(Debug, Clone)]
pub struct ResourceBudget {
    pool: ResourcePool,
    limits: ResourceLimits,
}

impl ResourceBudget {
    pub fn new(limits: ResourceLimits) -> Self {
        Self {
            pool: ResourcePool::default(),
            limits,
        }
    }

    /// Current usage snapshot.
    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    /// Configured ceiling.
    pub fn limits(&self) -> &ResourceLimits {
        &self.limits
    }

    /// True iff the request fits under both the CPU and memory ceilings.
    /// Pure over current state; no side effects.
    pub fn check_availability(&self, req: &ResourceRequirements) -> bool {
        self.pool.cpu_usage + req.cpu() <= self.limits.max_cpu
            && self.pool.memory_usage + req.memory() <= self.limits.max_memory
    }

    /// Admit a workflow, incrementing the usage counters.
    ///
    /// Returns `false` with the pool unchanged when the request does not fit.
    /// Admission rejection is an expected outcome, never an error: there is
    /// no queueing and no waiting for resources to free up.
    pub fn allocate(&mut self, req: &ResourceRequirements) -> bool {
        if !self.check_availability(req) {
            return false;
        }
        self.pool.cpu_usage += req.cpu();
        self.pool.memory_usage += req.memory();
        self.pool.active_agents += req.agents();
        self.pool.concurrent_crews += 1;
        true
    }

    /// Return a workflow's counters to the pool, clamping each at zero.
    pub fn release(&mut self, req: &ResourceRequirements) {
        self.pool.cpu_usage = (self.pool.cpu_usage - req.cpu()).max(0.0);
        self.pool.memory_usage = (self.pool.memory_usage - req.memory()).max(0.0);
        self.pool.active_agents = self.pool.active_agents.saturating_sub(req.agents());
        self.pool.concurrent_crews = self.pool.concurrent_crews.saturating_sub(1);
    }
}

impl Default for ResourceBudget {
    fn default() -> Self {
        Self::new(ResourceLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(cpu: f64, memory: f64) -> ResourceRequirements {
        ResourceRequirements {
            cpu: Some(cpu),
            memory: Some(memory),
            agents: None,
        }
    }

    #[test]
    fn defaults_apply_when_unspecified() {
        let r = ResourceRequirements::default();
        assert_eq!(r.cpu(), DEFAULT_CPU_SHARE);
        assert_eq!(r.memory(), DEFAULT_MEMORY_SHARE);
        assert_eq!(r.agents(), DEFAULT_AGENT_SLOTS);
    }

    #[test]
    fn failed_check_implies_failed_allocate_and_unchanged_pool() {
        let mut budget = ResourceBudget::default();
        let oversized = req(0.9, 0.1);

        assert!(!budget.check_availability(&oversized));
        let before = budget.pool().clone();
        assert!(!budget.allocate(&oversized));
        assert_eq!(budget.pool(), &before);
    }

    #[test]
    fn allocate_release_round_trip_is_identity() {
        let mut budget = ResourceBudget::default();
        let r = ResourceRequirements {
            cpu: Some(0.3),
            memory: Some(0.2),
            agents: Some(4),
        };

        let before = budget.pool().clone();
        assert!(budget.allocate(&r));
        budget.release(&r);
        assert_eq!(budget.pool(), &before);
    }

    #[test]
    fn excess_release_clamps_at_zero() {
        let mut budget = ResourceBudget::default();
        budget.release(&req(0.5, 0.5));
        budget.release(&req(0.5, 0.5));

        assert_eq!(budget.pool().cpu_usage, 0.0);
        assert_eq!(budget.pool().memory_usage, 0.0);
        assert_eq!(budget.pool().active_agents, 0);
        assert_eq!(budget.pool().concurrent_crews, 0);
    }

    #[test]
    fn second_half_share_request_is_rejected_against_default_ceiling() {
        // Two requests of cpu=0.5 against max_cpu=0.8: the first fits, the
        // second would land at 1.0 and must be turned away without drift.
        let mut budget = ResourceBudget::default();

        assert!(budget.allocate(&req(0.5, 0.1)));
        assert_eq!(budget.pool().cpu_usage, 0.5);

        assert!(!budget.allocate(&req(0.5, 0.1)));
        assert_eq!(budget.pool().cpu_usage, 0.5);
    }

    #[test]
    fn allocation_tracks_agent_slots_and_crews() {
        let mut budget = ResourceBudget::default();
        let r = ResourceRequirements {
            cpu: Some(0.2),
            memory: Some(0.2),
            agents: Some(3),
        };

        assert!(budget.allocate(&r));
        assert_eq!(budget.pool().active_agents, 3);
        assert_eq!(budget.pool().concurrent_crews, 1);

        budget.release(&r);
        assert_eq!(budget.pool().active_agents, 0);
        assert_eq!(budget.pool().concurrent_crews, 0);
    }
}
