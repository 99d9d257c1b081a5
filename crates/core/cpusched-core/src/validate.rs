//! Boundary validation
//!
//! Every check runs once at entry. A rejected input never reaches a policy,
//! so no partial results exist.

use std::collections::HashSet;

use crate::error::{Result, SchedError};
use crate::types::{ProcessSpec, Tick};

/// Check a process set against the data model contract.
///
/// `require_priority` is set for priority policies.
pub fn validate_processes(processes: &[ProcessSpec], require_priority: bool) -> Result<()> {
    if processes.is_empty() {
        return Err(SchedError::empty_process_set());
    }

    let mut seen = HashSet::with_capacity(processes.len());
    let mut latest_arrival: Tick = 0;
    let mut total_burst: Option<Tick> = Some(0);
    for spec in processes {
        if !seen.insert(spec.id.as_str()) {
            return Err(SchedError::duplicate_id(&spec.id));
        }
        if spec.arrival < 0 {
            return Err(SchedError::negative_arrival(&spec.id, spec.arrival));
        }
        if spec.burst < 1 {
            return Err(SchedError::non_positive_burst(&spec.id, spec.burst));
        }
        if require_priority && spec.priority.is_none() {
            return Err(SchedError::missing_priority(&spec.id));
        }
        latest_arrival = latest_arrival.max(spec.arrival);
        total_burst = total_burst.and_then(|total| total.checked_add(spec.burst));
    }

    // The clock never passes the latest arrival plus all work
    if total_burst.and_then(|total| total.checked_add(latest_arrival)).is_none() {
        return Err(SchedError::time_horizon_overflow());
    }

    Ok(())
}

/// Check a Round Robin time quantum, returning it when usable
pub fn validate_quantum(quantum: Option<Tick>) -> Result<Tick> {
    match quantum {
        None => Err(SchedError::missing_quantum()),
        Some(q) if q < 1 => Err(SchedError::non_positive_quantum(q)),
        Some(q) => Ok(q),
    }
}
