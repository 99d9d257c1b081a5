//! Process records shared by every scheduling policy

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchedError;

/// Simulated time. A monotonically increasing integer counter, never wall-clock.
pub type Tick = i64;

/// A process to be scheduled (input, immutable once constructed)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Stable, unique name (e.g. "P1")
    pub id: String,
    pub arrival: Tick,
    /// Total CPU time required
    pub burst: Tick,
    /// Lower value = higher priority. Only required by priority policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ProcessSpec {
    pub fn new(id: impl Into<String>, arrival: Tick, burst: Tick) -> Self {
        ProcessSpec {
            id: id.into(),
            arrival,
            burst,
            priority: None,
        }
    }

    /// Set the scheduling priority
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl fmt::Display for ProcessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.id, self.arrival, self.burst)?;
        if let Some(priority) = self.priority {
            write!(f, ":{priority}")?;
        }
        Ok(())
    }
}

/// Parses the compact `id:arrival:burst[:priority]` form
impl FromStr for ProcessSpec {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) || parts[0].is_empty() {
            return Err(SchedError::invalid(format!(
                "expected id:arrival:burst[:priority], got {s:?}"
            )));
        }

        let number = |field: &str, value: &str| {
            value.parse::<i64>().map_err(|_| {
                SchedError::invalid(format!(
                    "{field} of {:?} is not an integer: {value:?}",
                    parts[0]
                ))
            })
        };

        let mut spec =
            ProcessSpec::new(parts[0], number("arrival", parts[1])?, number("burst", parts[2])?);
        if let Some(priority) = parts.get(3) {
            spec.priority = Some(number("priority", priority)?);
        }
        Ok(spec)
    }
}

/// Per-process outcome of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub id: String,
    pub arrival: Tick,
    pub burst: Tick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Time of first CPU allocation
    pub start: Option<Tick>,
    /// Time the CPU work finished
    pub completion: Tick,
    pub turnaround: Tick,
    pub waiting: Tick,
}

impl ProcessResult {
    /// Build a finalized result from the spec, its first dispatch and its completion
    pub fn finalize(spec: &ProcessSpec, start: Option<Tick>, completion: Tick) -> Self {
        let turnaround = completion - spec.arrival;
        ProcessResult {
            id: spec.id.clone(),
            arrival: spec.arrival,
            burst: spec.burst,
            priority: spec.priority,
            start,
            completion,
            turnaround,
            waiting: turnaround - spec.burst,
        }
    }

    /// Delay between arrival and first dispatch
    pub fn response(&self) -> Option<Tick> {
        self.start.map(|start| start - self.arrival)
    }
}
