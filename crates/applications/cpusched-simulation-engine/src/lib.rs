//! CPU Scheduling Simulation Engine
//!
//! Discrete-event simulator for classical single-CPU scheduling policies.
//! Every run is a pure function of the process set, the policy and (for
//! Round Robin) the quantum: no state is shared between runs.

pub mod compare;
pub mod metrics;
pub mod policies;
pub mod simulator;
pub mod workload;

pub use compare::{ComparisonRow, best_by_waiting, compare, compare_policies};
pub use metrics::{AverageMetrics, ScheduleSummary, average_metrics, summarize};
pub use policies::{Policy, Schedule, SchedulingPolicy};
pub use simulator::{Simulator, run, verify_schedule};
pub use workload::{WorkloadGenerator, load_processes, write_json};

#[cfg(feature = "async")]
pub use compare::compare_policies_async;
