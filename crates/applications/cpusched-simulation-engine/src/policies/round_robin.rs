//! Round Robin
//!
//! FIFO ready queue with a fixed time quantum. Each dispatch cycle:
//! 1. Admit every arrived process, in arrival order
//! 2. If the queue is empty, idle until the next arrival
//! 3. Run the head for `min(quantum, remaining)` units
//! 4. Admit processes that arrived during that slice
//! 5. Re-queue the slice's process at the tail if it still has work
//!
//! Step 4 before step 5 means a process arriving at the exact instant a slice
//! ends is queued ahead of the process that was just preempted.

use std::collections::VecDeque;

use cpusched_core::Tick;
use tracing::debug;

use super::SchedulingPolicy;
use crate::simulator::Simulator;

/// Round Robin policy
#[derive(Debug, Clone, Copy)]
pub struct RoundRobinPolicy {
    quantum: Tick,
}

impl RoundRobinPolicy {
    /// Create a policy with a validated, positive quantum
    pub fn new(quantum: Tick) -> Self {
        debug_assert!(quantum > 0, "quantum must be positive");
        RoundRobinPolicy { quantum }
    }
}

fn admit_arrived(sim: &mut Simulator<'_>, queue: &mut VecDeque<usize>) {
    while let Some(index) = sim.next_arrived() {
        queue.push_back(index);
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn name(&self) -> &str {
        "Round Robin"
    }

    fn simulate(&self, sim: &mut Simulator<'_>) {
        let mut queue = VecDeque::with_capacity(sim.processes().len());

        loop {
            admit_arrived(sim, &mut queue);

            let Some(index) = queue.pop_front() else {
                if sim.idle_until_next_arrival() {
                    continue;
                }
                break;
            };

            let slice = self.quantum.min(sim.remaining(index));
            debug!(process = %sim.spec(index).id, clock = sim.clock(), slice, "dispatch");
            let remaining = sim.execute(index, slice);

            admit_arrived(sim, &mut queue);
            if remaining > 0 {
                queue.push_back(index);
            }
        }
    }
}
