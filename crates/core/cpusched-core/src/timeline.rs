//! CPU occupancy timeline
//!
//! Records the intervals during which a process holds the CPU. Idle gaps are
//! never recorded. An interval that continues the previous segment (same
//! process, starts where the last one ended) extends it instead of opening a
//! new segment, so every segment is maximal.

use serde::{Deserialize, Serialize};

use crate::types::Tick;

/// A maximal contiguous interval `[start, end)` on the CPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub process_id: String,
    pub start: Tick,
    pub end: Tick,
}

impl Segment {
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Ordered sequence of CPU-busy segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub segments: Vec<Segment>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `process_id` ran over `[start, end)`.
    ///
    /// Empty intervals are ignored. Callers record in non-decreasing time order.
    pub fn record(&mut self, process_id: &str, start: Tick, end: Tick) {
        if end <= start {
            return;
        }
        debug_assert!(
            self.segments.last().is_none_or(|last| last.end <= start),
            "interval [{start}, {end}) for {process_id} recorded out of order"
        );

        if let Some(last) = self.segments.last_mut() {
            if last.process_id == process_id && last.end == start {
                last.end = end;
                return;
            }
        }

        self.segments.push(Segment {
            process_id: process_id.to_string(),
            start,
            end,
        });
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Total time the CPU was busy
    pub fn busy_time(&self) -> Tick {
        self.segments.iter().map(Segment::duration).sum()
    }

    /// Total CPU time given to one process
    pub fn busy_time_of(&self, process_id: &str) -> Tick {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .map(Segment::duration)
            .sum()
    }

    /// End of the last busy segment (0 for an empty timeline)
    pub fn makespan(&self) -> Tick {
        self.segments.last().map(|s| s.end).unwrap_or(0)
    }

    /// Number of dispatches that handed the CPU to a different process
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].process_id != pair[1].process_id)
            .count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
