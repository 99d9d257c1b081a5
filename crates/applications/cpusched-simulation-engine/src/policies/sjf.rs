//! Shortest Job First (non-preemptive)

use super::SchedulingPolicy;
use super::dispatch::run_non_preemptive;
use crate::simulator::Simulator;

/// SJF: among arrived processes pick the smallest burst, ties by earliest
/// arrival then input order, and run it to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfPolicy;

impl SjfPolicy {
    pub fn new() -> Self {
        SjfPolicy
    }
}

impl SchedulingPolicy for SjfPolicy {
    fn name(&self) -> &str {
        "SJF"
    }

    fn simulate(&self, sim: &mut Simulator<'_>) {
        run_non_preemptive(sim, |sim, index| sim.spec(index).burst);
    }
}
