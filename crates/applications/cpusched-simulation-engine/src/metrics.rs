//! Aggregate metrics over a finished schedule

use cpusched_core::{ProcessResult, Tick};
use serde::{Deserialize, Serialize};

use crate::policies::Schedule;

/// Average turnaround and waiting time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
}

/// Averages over `results`. An empty slice yields zeros.
pub fn average_metrics(results: &[ProcessResult]) -> AverageMetrics {
    if results.is_empty() {
        return AverageMetrics::default();
    }

    let n = results.len() as f64;
    AverageMetrics {
        avg_turnaround: results.iter().map(|r| r.turnaround as f64).sum::<f64>() / n,
        avg_waiting: results.iter().map(|r| r.waiting as f64).sum::<f64>() / n,
    }
}

/// Summary of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub policy: String,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    /// Mean delay between arrival and first dispatch
    pub avg_response: f64,
    pub makespan: Tick,
    /// Busy time over the span from first arrival to makespan
    pub cpu_utilization: f64,
    /// Completed processes per time unit over the same span
    pub throughput: f64,
    pub context_switches: usize,
}

pub fn summarize(schedule: &Schedule) -> ScheduleSummary {
    let averages = average_metrics(&schedule.results);
    let makespan = schedule.timeline.makespan();
    let first_arrival = schedule.results.iter().map(|r| r.arrival).min().unwrap_or(0);
    let span = (makespan - first_arrival) as f64;

    let responses: Vec<Tick> =
        schedule.results.iter().filter_map(ProcessResult::response).collect();
    let avg_response = if responses.is_empty() {
        0.0
    } else {
        responses.iter().sum::<Tick>() as f64 / responses.len() as f64
    };

    let (cpu_utilization, throughput) = if span > 0.0 {
        (
            schedule.timeline.busy_time() as f64 / span,
            schedule.results.len() as f64 / span,
        )
    } else {
        (0.0, 0.0)
    };

    ScheduleSummary {
        policy: schedule.policy.clone(),
        avg_turnaround: averages.avg_turnaround,
        avg_waiting: averages.avg_waiting,
        avg_response,
        makespan,
        cpu_utilization,
        throughput,
        context_switches: schedule.timeline.context_switches(),
    }
}
