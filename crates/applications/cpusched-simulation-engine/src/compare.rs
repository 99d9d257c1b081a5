//! Comparison driver
//!
//! Runs several policies over the same process set and tabulates their
//! aggregate metrics. Every run is an independent pure function call, so the
//! async variant simply fans them out onto blocking tasks.

use cpusched_core::{ProcessSpec, Result, Tick};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::metrics::summarize;
use crate::policies::Policy;
use crate::simulator::run;

/// Aggregate metrics of one policy over a shared process set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub policy: Policy,
    pub avg_turnaround: f64,
    pub avg_waiting: f64,
    pub avg_response: f64,
    pub cpu_utilization: f64,
    pub context_switches: usize,
}

impl ComparisonRow {
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

fn compare_one(policy: Policy, processes: &[ProcessSpec], quantum: Tick) -> Result<ComparisonRow> {
    let summary = summarize(&run(policy, processes, Some(quantum))?);

    Ok(ComparisonRow {
        policy,
        avg_turnaround: summary.avg_turnaround,
        avg_waiting: summary.avg_waiting,
        avg_response: summary.avg_response,
        cpu_utilization: summary.cpu_utilization,
        context_switches: summary.context_switches,
    })
}

/// Compare every policy (see [`Policy::ALL`]).
///
/// Priority policies need a priority on every process; without one the
/// whole comparison is rejected.
pub fn compare(processes: &[ProcessSpec], quantum: Tick) -> Result<Vec<ComparisonRow>> {
    compare_policies(processes, &Policy::ALL, quantum)
}

/// Compare `policies`, one row each, in exactly the requested order
pub fn compare_policies(
    processes: &[ProcessSpec],
    policies: &[Policy],
    quantum: Tick,
) -> Result<Vec<ComparisonRow>> {
    let rows = policies
        .iter()
        .map(|&policy| compare_one(policy, processes, quantum))
        .collect::<Result<Vec<_>>>()?;

    info!(policies = rows.len(), processes = processes.len(), "comparison complete");
    Ok(rows)
}

/// Row with the lowest average waiting time (first wins on ties)
pub fn best_by_waiting(rows: &[ComparisonRow]) -> Option<&ComparisonRow> {
    rows.iter().reduce(|best, row| {
        if row.avg_waiting < best.avg_waiting {
            row
        } else {
            best
        }
    })
}

/// Compare `policies` concurrently on blocking tasks, rows in requested order
#[cfg(feature = "async")]
pub async fn compare_policies_async(
    processes: &[ProcessSpec],
    policies: &[Policy],
    quantum: Tick,
) -> Result<Vec<ComparisonRow>> {
    let processes = std::sync::Arc::new(processes.to_vec());

    let handles: Vec<_> = policies
        .iter()
        .map(|&policy| {
            let processes = std::sync::Arc::clone(&processes);
            tokio::task::spawn_blocking(move || compare_one(policy, &processes, quantum))
        })
        .collect();

    let mut rows = Vec::with_capacity(handles.len());
    for handle in handles {
        let row = handle.await.map_err(|e| {
            cpusched_core::SchedError::invariant(format!("comparison task failed: {e}"))
        })??;
        rows.push(row);
    }

    info!(policies = rows.len(), processes = processes.len(), "concurrent comparison complete");
    Ok(rows)
}
