//! Scheduling policies
//!
//! Implements the classical single-CPU policies to compare:
//! - FCFS: run in arrival order, never preempt
//! - SJF: shortest burst among arrived processes, run to completion
//! - SRTF: shortest remaining time, re-evaluated whenever a process arrives
//! - Priority: lowest priority value wins, non-preemptive or preemptive
//! - Round Robin: FIFO ready queue with a fixed time quantum

mod dispatch;
pub mod fcfs;
pub mod priority;
pub mod round_robin;
pub mod sjf;
pub mod srtf;

use std::fmt;
use std::str::FromStr;

use cpusched_core::{
    ProcessResult, ProcessSpec, Result, SchedError, Tick, Timeline, validate_processes,
    validate_quantum,
};
use serde::{Deserialize, Serialize};

use crate::simulator::Simulator;

pub use fcfs::FcfsPolicy;
pub use priority::PriorityPolicy;
pub use round_robin::RoundRobinPolicy;
pub use sjf::SjfPolicy;
pub use srtf::SrtfPolicy;

/// Outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub policy: String,
    /// One result per input process, in input order
    pub results: Vec<ProcessResult>,
    pub timeline: Timeline,
}

/// Scheduling policy trait
pub trait SchedulingPolicy: Send + Sync {
    /// Get policy name
    fn name(&self) -> &str;

    /// Whether every process must carry a priority
    fn requires_priority(&self) -> bool {
        false
    }

    /// Drive the simulator until every process has completed
    fn simulate(&self, sim: &mut Simulator<'_>);

    /// Validate `processes` and simulate them from a fresh state
    fn schedule(&self, processes: &[ProcessSpec]) -> Result<Schedule> {
        validate_processes(processes, self.requires_priority())?;

        let mut sim = Simulator::new(processes);
        self.simulate(&mut sim);
        sim.finish(self.name())
    }
}

/// Policy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtf,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin,
}

impl Policy {
    /// Every policy, in comparison order
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::PriorityNonPreemptive,
        Policy::PriorityPreemptive,
        Policy::RoundRobin,
    ];

    /// Display name used in results and comparison rows
    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Srtf => "SRTF",
            Policy::PriorityNonPreemptive => "Priority (NP)",
            Policy::PriorityPreemptive => "Priority (P)",
            Policy::RoundRobin => "Round Robin",
        }
    }

    /// Short name accepted on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Srtf => "srtf",
            Policy::PriorityNonPreemptive => "priority",
            Policy::PriorityPreemptive => "priority-preemptive",
            Policy::RoundRobin => "rr",
        }
    }

    pub fn requires_priority(self) -> bool {
        matches!(self, Policy::PriorityNonPreemptive | Policy::PriorityPreemptive)
    }

    pub fn requires_quantum(self) -> bool {
        self == Policy::RoundRobin
    }

    pub fn is_preemptive(self) -> bool {
        matches!(self, Policy::Srtf | Policy::PriorityPreemptive | Policy::RoundRobin)
    }

    /// Instantiate the policy. `quantum` is validated for Round Robin and ignored otherwise.
    pub fn build(self, quantum: Option<Tick>) -> Result<Box<dyn SchedulingPolicy>> {
        Ok(match self {
            Policy::Fcfs => Box::new(FcfsPolicy::new()),
            Policy::Sjf => Box::new(SjfPolicy::new()),
            Policy::Srtf => Box::new(SrtfPolicy::new()),
            Policy::PriorityNonPreemptive => Box::new(PriorityPolicy::non_preemptive()),
            Policy::PriorityPreemptive => Box::new(PriorityPolicy::preemptive()),
            Policy::RoundRobin => Box::new(RoundRobinPolicy::new(validate_quantum(quantum)?)),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self> {
        let policy = match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Policy::Fcfs,
            "sjf" => Policy::Sjf,
            "srtf" | "sjf-preemptive" => Policy::Srtf,
            "priority" | "priority-np" => Policy::PriorityNonPreemptive,
            "priority-preemptive" | "priority-p" => Policy::PriorityPreemptive,
            "rr" | "round-robin" => Policy::RoundRobin,
            other => return Err(SchedError::invalid(format!("unknown policy: {other}"))),
        };
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_names_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.cli_name().parse::<Policy>().unwrap(), policy);
            assert_eq!(policy.build(Some(2)).unwrap().name(), policy.name());
        }
        assert_eq!("Round-Robin".parse::<Policy>().unwrap(), Policy::RoundRobin);
        assert!("lottery".parse::<Policy>().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_policy_requirements() {
        assert!(Policy::RoundRobin.requires_quantum());
        assert!(!Policy::Sjf.requires_quantum());
        assert!(Policy::PriorityPreemptive.requires_priority());
        assert!(!Policy::Srtf.requires_priority());
        assert!(Policy::Srtf.is_preemptive());
        assert!(!Policy::PriorityNonPreemptive.is_preemptive());
    }

    #[test]
    fn test_build_validates_quantum_for_round_robin_only() {
        assert!(Policy::RoundRobin.build(None).is_err());
        assert!(Policy::RoundRobin.build(Some(0)).is_err());
        assert!(Policy::Fcfs.build(None).is_ok());
        assert!(Policy::Fcfs.build(Some(0)).is_ok());
    }

    #[test]
    fn test_schedule_rejects_empty_input() {
        for policy in Policy::ALL {
            let scheduler = policy.build(Some(1)).unwrap();
            assert!(scheduler.schedule(&[]).unwrap_err().is_invalid_input());
        }
    }
}
