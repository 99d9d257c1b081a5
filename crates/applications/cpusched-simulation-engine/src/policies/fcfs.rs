//! First-Come-First-Served

use tracing::debug;

use super::SchedulingPolicy;
use crate::simulator::Simulator;

/// FCFS: run processes in arrival order, each to completion.
/// Equal arrivals keep their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfsPolicy;

impl FcfsPolicy {
    pub fn new() -> Self {
        FcfsPolicy
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn name(&self) -> &str {
        "FCFS"
    }

    fn simulate(&self, sim: &mut Simulator<'_>) {
        let order = sim.arrival_order().to_vec();

        for index in order {
            let spec = sim.spec(index);
            // The gap up to a late arrival is idle and never recorded
            sim.advance_to(spec.arrival);
            debug!(process = %spec.id, clock = sim.clock(), "dispatch");
            sim.execute(index, spec.burst);
        }
    }
}
