//! Shortest Remaining Time First (preemptive SJF)

use super::SchedulingPolicy;
use super::dispatch::run_preemptive;
use crate::simulator::Simulator;

/// SRTF: the arrived process with the least remaining work holds the CPU.
/// Ties go to the earliest arrival, then input order. An arrival with
/// strictly less remaining work preempts the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtfPolicy;

impl SrtfPolicy {
    pub fn new() -> Self {
        SrtfPolicy
    }
}

impl SchedulingPolicy for SrtfPolicy {
    fn name(&self) -> &str {
        "SRTF"
    }

    fn simulate(&self, sim: &mut Simulator<'_>) {
        run_preemptive(sim, |sim, index| sim.remaining(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpusched_core::{ProcessSpec, Segment};

    fn seg(id: &str, start: i64, end: i64) -> Segment {
        Segment {
            process_id: id.to_string(),
            start,
            end,
        }
    }

    #[test]
    fn test_srtf_preemption() {
        let processes = vec![ProcessSpec::new("P1", 0, 8), ProcessSpec::new("P2", 1, 4)];
        let schedule = SrtfPolicy::new().schedule(&processes).unwrap();

        assert_eq!(
            schedule.timeline.segments,
            vec![seg("P1", 0, 1), seg("P2", 1, 5), seg("P1", 5, 12)]
        );
        // Start is set by the first selection only
        assert_eq!(schedule.results[0].start, Some(0));
        assert_eq!(schedule.results[0].completion, 12);
        assert_eq!(schedule.results[0].waiting, 4);
        assert_eq!(schedule.results[1].completion, 5);
        assert_eq!(schedule.results[1].waiting, 0);
    }

    #[test]
    fn test_srtf_equal_remaining_does_not_preempt() {
        // At t=2 P1 has 3 left and P2 needs 3: earlier arrival keeps the CPU
        let processes = vec![ProcessSpec::new("P1", 0, 5), ProcessSpec::new("P2", 2, 3)];
        let schedule = SrtfPolicy::new().schedule(&processes).unwrap();

        assert_eq!(schedule.timeline.segments, vec![seg("P1", 0, 5), seg("P2", 5, 8)]);
    }

    #[test]
    fn test_srtf_arrivals_without_preemption_stay_merged() {
        // P2 and P3 arrive while P1 is shortest: one unbroken P1 segment
        let processes = vec![
            ProcessSpec::new("P1", 0, 3),
            ProcessSpec::new("P2", 1, 6),
            ProcessSpec::new("P3", 2, 4),
        ];
        let schedule = SrtfPolicy::new().schedule(&processes).unwrap();

        assert_eq!(
            schedule.timeline.segments,
            vec![seg("P1", 0, 3), seg("P3", 3, 7), seg("P2", 7, 13)]
        );
    }

    #[test]
    fn test_srtf_idle_then_resume() {
        let processes = vec![
            ProcessSpec::new("P1", 0, 2),
            ProcessSpec::new("P2", 4, 3),
            ProcessSpec::new("P3", 5, 1),
        ];
        let schedule = SrtfPolicy::new().schedule(&processes).unwrap();

        assert_eq!(
            schedule.timeline.segments,
            vec![seg("P1", 0, 2), seg("P2", 4, 5), seg("P3", 5, 6), seg("P2", 6, 8)]
        );
        assert_eq!(schedule.results[1].start, Some(4));
        assert_eq!(schedule.results[1].completion, 8);
    }
}
