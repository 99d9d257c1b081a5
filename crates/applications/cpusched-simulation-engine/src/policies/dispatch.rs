//! Keyed dispatch loops shared by SJF, SRTF and both priority policies
//!
//! Eligible processes sit in a min-heap ordered by (key, arrival, input order).
//! The non-preemptive loop runs each pick to completion. The preemptive loop
//! runs a pick only until the next arrival, then puts it back with a fresh key
//! and decides again. Between arrivals the set of eligible processes cannot
//! change and the running process's key never gets worse, so this gives the
//! same decisions as re-selecting every single time unit.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use cpusched_core::Tick;
use tracing::debug;

use crate::simulator::Simulator;

/// Ready process wrapper for priority queue ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ReadyEntry {
    key: i64,
    arrival: Tick,
    index: usize,
}

// Smallest (key, arrival, index) first
impl Ord for ReadyEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse comparison for min-heap (BinaryHeap is max-heap by default)
        (other.key, other.arrival, other.index).cmp(&(self.key, self.arrival, self.index))
    }
}

impl PartialOrd for ReadyEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Selection key of a process given the current simulator state
pub(crate) type KeyFn = fn(&Simulator<'_>, usize) -> i64;

struct ReadyQueue {
    heap: BinaryHeap<ReadyEntry>,
    key: KeyFn,
}

impl ReadyQueue {
    fn new(key: KeyFn) -> Self {
        ReadyQueue {
            heap: BinaryHeap::new(),
            key,
        }
    }

    fn push(&mut self, sim: &Simulator<'_>, index: usize) {
        self.heap.push(ReadyEntry {
            key: (self.key)(sim, index),
            arrival: sim.spec(index).arrival,
            index,
        });
    }

    fn admit_arrived(&mut self, sim: &mut Simulator<'_>) {
        while let Some(index) = sim.next_arrived() {
            self.push(sim, index);
        }
    }

    fn pop(&mut self) -> Option<ReadyEntry> {
        self.heap.pop()
    }
}

/// Pick by key, run the pick to completion, repeat
pub(crate) fn run_non_preemptive(sim: &mut Simulator<'_>, key: KeyFn) {
    let mut ready = ReadyQueue::new(key);

    loop {
        ready.admit_arrived(sim);

        let Some(entry) = ready.pop() else {
            if sim.idle_until_next_arrival() {
                continue;
            }
            break;
        };

        debug!(
            process = %sim.spec(entry.index).id,
            clock = sim.clock(),
            key = entry.key,
            "dispatch"
        );
        sim.execute(entry.index, sim.remaining(entry.index));
    }
}

/// Pick by key, run the pick until the next arrival or completion, repeat
pub(crate) fn run_preemptive(sim: &mut Simulator<'_>, key: KeyFn) {
    let mut ready = ReadyQueue::new(key);

    loop {
        ready.admit_arrived(sim);

        let Some(entry) = ready.pop() else {
            if sim.idle_until_next_arrival() {
                continue;
            }
            break;
        };

        let index = entry.index;
        let remaining = sim.remaining(index);
        // Every admitted process arrived at or before the clock, so the slice is at least one unit
        let slice = match sim.next_arrival_time() {
            Some(arrival) => remaining.min(arrival - sim.clock()),
            None => remaining,
        };

        debug!(
            process = %sim.spec(index).id,
            clock = sim.clock(),
            key = entry.key,
            slice,
            "dispatch"
        );
        if sim.execute(index, slice) > 0 {
            ready.push(sim, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_entry_min_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(ReadyEntry { key: 3, arrival: 0, index: 0 });
        heap.push(ReadyEntry { key: 1, arrival: 2, index: 1 });
        heap.push(ReadyEntry { key: 1, arrival: 1, index: 3 });
        heap.push(ReadyEntry { key: 1, arrival: 1, index: 2 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop()).map(|e| e.index).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }
}
