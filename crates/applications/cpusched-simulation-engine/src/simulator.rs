//! Discrete-event simulator for single-CPU scheduling
//!
//! [`Simulator`] holds the per-run mutable state (clock, remaining work,
//! first-dispatch and completion times, the timeline) and exposes the few
//! primitives every policy is built from: admit arrivals, idle to the next
//! arrival, execute a process for some units. Idle time is skipped by jumping
//! the clock straight to the next arrival.
//!
//! [`run`] is the public entry point: validate, schedule, verify.

use cpusched_core::{ProcessResult, ProcessSpec, Result, SchedError, Tick, Timeline};
use tracing::{debug, info, trace, warn};

use crate::policies::{Policy, Schedule};

/// Index-based event loop state for one simulation run
pub struct Simulator<'a> {
    processes: &'a [ProcessSpec],
    /// Process indices sorted by (arrival, input order)
    arrival_order: Vec<usize>,
    /// Cursor into `arrival_order`: everything before it has been admitted
    next_arrival: usize,
    clock: Tick,
    remaining: Vec<Tick>,
    start: Vec<Option<Tick>>,
    completion: Vec<Option<Tick>>,
    completed: usize,
    timeline: Timeline,
}

impl<'a> Simulator<'a> {
    pub fn new(processes: &'a [ProcessSpec]) -> Self {
        let mut arrival_order: Vec<usize> = (0..processes.len()).collect();
        // Stable: equal arrivals keep input order
        arrival_order.sort_by_key(|&i| processes[i].arrival);

        Simulator {
            processes,
            arrival_order,
            next_arrival: 0,
            clock: 0,
            remaining: processes.iter().map(|p| p.burst).collect(),
            start: vec![None; processes.len()],
            completion: vec![None; processes.len()],
            completed: 0,
            timeline: Timeline::new(),
        }
    }

    pub fn processes(&self) -> &'a [ProcessSpec] {
        self.processes
    }

    pub fn spec(&self, index: usize) -> &'a ProcessSpec {
        &self.processes[index]
    }

    pub fn clock(&self) -> Tick {
        self.clock
    }

    pub fn remaining(&self, index: usize) -> Tick {
        self.remaining[index]
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Process indices in admission order (arrival, then input order)
    pub fn arrival_order(&self) -> &[usize] {
        &self.arrival_order
    }

    /// Admit the next process whose arrival is at or before the clock
    pub fn next_arrived(&mut self) -> Option<usize> {
        let &index = self.arrival_order.get(self.next_arrival)?;
        if self.processes[index].arrival > self.clock {
            return None;
        }
        self.next_arrival += 1;
        Some(index)
    }

    /// Arrival time of the earliest process not yet admitted
    pub fn next_arrival_time(&self) -> Option<Tick> {
        self.arrival_order
            .get(self.next_arrival)
            .map(|&i| self.processes[i].arrival)
    }

    /// Move the clock forward to `time` (never backwards)
    pub fn advance_to(&mut self, time: Tick) {
        if time > self.clock {
            debug!(from = self.clock, to = time, "CPU idle");
            self.clock = time;
        }
    }

    /// Jump the clock to the next arrival. Returns false when nothing is left to arrive.
    pub fn idle_until_next_arrival(&mut self) -> bool {
        match self.next_arrival_time() {
            Some(time) => {
                self.advance_to(time);
                true
            }
            None => false,
        }
    }

    /// Run process `index` for `units` ticks starting at the current clock.
    ///
    /// Records first dispatch, extends the timeline and finalizes completion
    /// when the remaining work reaches zero. Returns the remaining work.
    pub fn execute(&mut self, index: usize, units: Tick) -> Tick {
        let units = units.min(self.remaining[index]);
        if units <= 0 {
            return self.remaining[index];
        }

        let spec = &self.processes[index];
        let begin = self.clock;
        self.start[index].get_or_insert(begin);

        self.clock += units;
        self.remaining[index] -= units;
        self.timeline.record(&spec.id, begin, self.clock);
        trace!(process = %spec.id, start = begin, end = self.clock, "executed");

        if self.remaining[index] == 0 {
            self.completion[index] = Some(self.clock);
            self.completed += 1;
            debug!(process = %spec.id, completion = self.clock, "process completed");
        }

        self.remaining[index]
    }

    /// Collect results in input order together with the timeline
    pub fn finish(self, policy: &str) -> Result<Schedule> {
        if !self.is_finished() {
            return Err(SchedError::invariant(format!(
                "{policy}: {} of {} processes completed",
                self.completed,
                self.processes.len()
            )));
        }

        let results = self
            .processes
            .iter()
            .zip(self.start.iter().zip(&self.completion))
            .map(|(spec, (&start, &completion))| {
                let completion = completion.ok_or_else(|| {
                    SchedError::invariant(format!("{policy}: process {} never completed", spec.id))
                })?;
                Ok(ProcessResult::finalize(spec, start, completion))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Schedule {
            policy: policy.to_string(),
            results,
            timeline: self.timeline,
        })
    }
}

/// Simulate `processes` under `policy`.
///
/// Input is validated before any computation. `quantum` is required by
/// Round Robin and ignored by every other policy. The produced schedule is
/// checked against the scheduling invariants before it is returned.
pub fn run(policy: Policy, processes: &[ProcessSpec], quantum: Option<Tick>) -> Result<Schedule> {
    let schedule = policy
        .build(quantum)
        .and_then(|scheduler| scheduler.schedule(processes))
        .inspect_err(|e| {
            if e.is_invalid_input() {
                warn!(policy = %policy, "rejected input: {}", e);
            }
        })?;

    verify_schedule(processes, &schedule)?;

    info!(
        policy = %policy,
        processes = processes.len(),
        segments = schedule.timeline.len(),
        makespan = schedule.timeline.makespan(),
        "simulation complete"
    );
    Ok(schedule)
}

/// Check a finished schedule against the result and timeline invariants
pub fn verify_schedule(processes: &[ProcessSpec], schedule: &Schedule) -> Result<()> {
    let policy = &schedule.policy;
    let violation = |msg: String| Err(SchedError::invariant(format!("{policy}: {msg}")));

    if schedule.results.len() != processes.len() {
        return violation(format!(
            "{} results for {} processes",
            schedule.results.len(),
            processes.len()
        ));
    }

    for (spec, result) in processes.iter().zip(&schedule.results) {
        if result.id != spec.id {
            return violation(format!("result {} out of input order", result.id));
        }
        if result.turnaround != result.completion - result.arrival
            || result.waiting != result.turnaround - result.burst
        {
            return violation(format!("inconsistent metrics for {}", result.id));
        }
        if result.waiting < 0 {
            return violation(format!("negative waiting time {} for {}", result.waiting, result.id));
        }
        match result.start {
            Some(start) if start >= result.arrival => {}
            _ => return violation(format!("{} dispatched before arrival or never", result.id)),
        }
        let busy = schedule.timeline.busy_time_of(&spec.id);
        if busy != spec.burst {
            return violation(format!("{} ran {} units, burst is {}", spec.id, busy, spec.burst));
        }
    }

    for segment in &schedule.timeline {
        if segment.end <= segment.start {
            return violation(format!("empty segment for {}", segment.process_id));
        }
    }
    for pair in schedule.timeline.segments.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if b.start < a.end {
            return violation(format!("segments of {} and {} overlap", a.process_id, b.process_id));
        }
        if a.process_id == b.process_id && a.end == b.start {
            return violation(format!("unmerged adjacent segments for {}", a.process_id));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::WorkloadGenerator;
    use cpusched_core::Segment;

    fn seg(id: &str, start: Tick, end: Tick) -> Segment {
        Segment {
            process_id: id.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_simulator_creation() {
        let processes = vec![ProcessSpec::new("P1", 3, 2), ProcessSpec::new("P2", 0, 1)];
        let simulator = Simulator::new(&processes);

        assert_eq!(simulator.clock(), 0);
        assert_eq!(simulator.arrival_order(), &[1, 0]);
        assert_eq!(simulator.next_arrival_time(), Some(0));
        assert!(!simulator.is_finished());
    }

    #[test]
    fn test_admission_and_idle_skip() {
        let processes = vec![ProcessSpec::new("P1", 4, 2), ProcessSpec::new("P2", 4, 1)];
        let mut simulator = Simulator::new(&processes);

        assert_eq!(simulator.next_arrived(), None);
        assert!(simulator.idle_until_next_arrival());
        assert_eq!(simulator.clock(), 4);
        assert_eq!(simulator.next_arrived(), Some(0));
        assert_eq!(simulator.next_arrived(), Some(1));
        assert_eq!(simulator.next_arrived(), None);
        assert!(!simulator.idle_until_next_arrival());
    }

    #[test]
    fn test_execute_tracks_start_and_completion() {
        let processes = vec![ProcessSpec::new("P1", 0, 3)];
        let mut simulator = Simulator::new(&processes);

        assert_eq!(simulator.execute(0, 2), 1);
        simulator.advance_to(5);
        assert_eq!(simulator.execute(0, 10), 0);
        assert!(simulator.is_finished());

        let schedule = simulator.finish("test").unwrap();
        let result = &schedule.results[0];
        assert_eq!(result.start, Some(0));
        assert_eq!(result.completion, 6);
        assert_eq!(result.waiting, 3);
        assert_eq!(schedule.timeline.segments, vec![seg("P1", 0, 2), seg("P1", 5, 6)]);
    }

    #[test]
    fn test_unfinished_run_is_an_invariant_violation() {
        let processes = vec![ProcessSpec::new("P1", 0, 3)];
        let mut simulator = Simulator::new(&processes);
        simulator.execute(0, 1);

        let err = simulator.finish("test").unwrap_err();
        assert!(matches!(err, SchedError::InvariantViolation(_)));
    }

    #[test]
    fn test_verify_catches_corrupted_schedule() {
        let processes = vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)];
        let mut schedule = run(Policy::Fcfs, &processes, None).unwrap();
        assert!(verify_schedule(&processes, &schedule).is_ok());

        schedule.results[1].completion = 3;
        schedule.results[1].turnaround = 2;
        schedule.results[1].waiting = -1;
        let err = verify_schedule(&processes, &schedule).unwrap_err();
        assert!(matches!(err, SchedError::InvariantViolation(_)));
    }

    #[test]
    fn test_verify_catches_unmerged_segments() {
        let processes = vec![ProcessSpec::new("P1", 0, 4)];
        let mut schedule = run(Policy::Srtf, &processes, None).unwrap();
        schedule.timeline.segments = vec![seg("P1", 0, 2), seg("P1", 2, 4)];

        assert!(verify_schedule(&processes, &schedule).is_err());
    }

    #[test]
    fn test_invalid_input_never_simulates() {
        let processes = vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P1", 1, 3)];
        for policy in Policy::ALL {
            let err = run(policy, &processes, Some(2)).unwrap_err();
            assert!(err.is_invalid_input(), "{policy} accepted duplicate ids");
        }

        let err = run(Policy::RoundRobin, &[ProcessSpec::new("P1", 0, 5)], None).unwrap_err();
        assert!(err.is_invalid_input());
        let err =
            run(Policy::PriorityPreemptive, &[ProcessSpec::new("P1", 0, 5)], None).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_time_horizon_overflow_rejected_before_simulating() {
        let processes = vec![ProcessSpec::new("P1", i64::MAX - 1, 5)];

        for policy in [Policy::Fcfs, Policy::Sjf, Policy::Srtf, Policy::RoundRobin] {
            let err = run(policy, &processes, Some(2)).unwrap_err();
            assert!(err.is_invalid_input(), "{policy} simulated an overflowing workload");
        }
    }

    #[test]
    fn test_quantum_ignored_by_other_policies() {
        let processes = vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 1, 3)];

        let with = run(Policy::Sjf, &processes, Some(-7)).unwrap();
        let without = run(Policy::Sjf, &processes, None).unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_all_policies_hold_invariants_on_generated_workloads() {
        for seed in 0..20 {
            let processes = WorkloadGenerator::new(seed)
                .with_mean_interarrival(3.0)
                .with_mean_burst(4.0)
                .generate(12)
                .unwrap();

            for policy in Policy::ALL {
                for quantum in [1, 2, 5] {
                    // run() verifies every invariant and errors otherwise
                    let schedule = run(policy, &processes, Some(quantum)).unwrap();

                    for result in &schedule.results {
                        assert!(result.completion >= result.arrival + result.burst);
                        assert!(result.waiting >= 0);
                    }
                    let busy: Tick = processes.iter().map(|p| p.burst).sum();
                    assert_eq!(schedule.timeline.busy_time(), busy);
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let processes = WorkloadGenerator::new(7).generate(10).unwrap();

        for policy in Policy::ALL {
            let first = run(policy, &processes, Some(3)).unwrap();
            let second = run(policy, &processes, Some(3)).unwrap();
            assert_eq!(first, second, "{policy} is not a pure function of its input");
        }
    }
}
