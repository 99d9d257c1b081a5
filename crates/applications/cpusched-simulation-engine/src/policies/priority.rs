//! Priority scheduling, non-preemptive and preemptive
//!
//! Lower numeric priority wins. Ties go to the earliest arrival, then input
//! order. The non-preemptive variant runs each pick to completion; the
//! preemptive variant lets a strictly higher-priority arrival take the CPU at
//! its arrival time.

use super::SchedulingPolicy;
use super::dispatch::{run_non_preemptive, run_preemptive};
use crate::simulator::Simulator;

// Validation guarantees a priority on every process before simulation
fn priority_key(sim: &Simulator<'_>, index: usize) -> i64 {
    sim.spec(index).priority.unwrap_or(i64::MAX)
}

/// Priority policy
#[derive(Debug, Clone, Copy)]
pub struct PriorityPolicy {
    preemptive: bool,
}

impl PriorityPolicy {
    pub fn non_preemptive() -> Self {
        PriorityPolicy { preemptive: false }
    }

    pub fn preemptive() -> Self {
        PriorityPolicy { preemptive: true }
    }
}

impl SchedulingPolicy for PriorityPolicy {
    fn name(&self) -> &str {
        if self.preemptive {
            "Priority (P)"
        } else {
            "Priority (NP)"
        }
    }

    fn requires_priority(&self) -> bool {
        true
    }

    fn simulate(&self, sim: &mut Simulator<'_>) {
        if self.preemptive {
            run_preemptive(sim, priority_key);
        } else {
            run_non_preemptive(sim, priority_key);
        }
    }
}
