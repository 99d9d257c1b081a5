//! Process sets: loading from JSON and synthetic generation
//!
//! Synthetic workloads model arrivals as a Poisson process (exponential
//! inter-arrival gaps) and bursts as exponentially distributed, rounded up
//! so every burst is at least one unit.

use std::fs;
use std::path::Path;

use cpusched_core::{ProcessSpec, Result, SchedError, Tick};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use serde::Serialize;
use tracing::debug;

/// Read a JSON array of process specs
pub fn load_processes(path: impl AsRef<Path>) -> Result<Vec<ProcessSpec>> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let processes: Vec<ProcessSpec> = serde_json::from_str(&json)?;
    debug!(path = %path.display(), processes = processes.len(), "loaded process set");
    Ok(processes)
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Seeded generator of synthetic process sets
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    mean_interarrival: f64,
    mean_burst: f64,
    priority_levels: i64,
}

impl WorkloadGenerator {
    /// Create a generator with default parameters
    ///
    /// # Defaults
    /// * `mean_interarrival` - 2.0 time units
    /// * `mean_burst` - 5.0 time units
    /// * `priority_levels` - 5 (priorities drawn from 1..=5)
    pub fn new(seed: u64) -> Self {
        WorkloadGenerator {
            seed,
            mean_interarrival: 2.0,
            mean_burst: 5.0,
            priority_levels: 5,
        }
    }

    pub fn with_mean_interarrival(mut self, mean: f64) -> Self {
        self.mean_interarrival = mean;
        self
    }

    pub fn with_mean_burst(mut self, mean: f64) -> Self {
        self.mean_burst = mean;
        self
    }

    pub fn with_priority_levels(mut self, levels: i64) -> Self {
        self.priority_levels = levels;
        self
    }

    /// Generate `count` processes named `P1..Pn`. The first arrives at 0.
    pub fn generate(&self, count: usize) -> Result<Vec<ProcessSpec>> {
        if count == 0 {
            return Err(SchedError::config("process count must be positive"));
        }
        if self.priority_levels < 1 {
            return Err(SchedError::config("priority levels must be at least 1"));
        }
        let gaps = exponential("mean inter-arrival", self.mean_interarrival)?;
        let bursts = exponential("mean burst", self.mean_burst)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut clock = 0.0_f64;

        let processes = (0..count)
            .map(|i| {
                if i > 0 {
                    clock += gaps.sample(&mut rng);
                }
                let burst = (bursts.sample(&mut rng).ceil() as Tick).max(1);
                let priority = rng.gen_range(1..=self.priority_levels);

                ProcessSpec::new(format!("P{}", i + 1), clock.floor() as Tick, burst)
                    .with_priority(priority)
            })
            .collect();

        Ok(processes)
    }

    /// Deterministic staircase set: `P{i}` arrives at `i-1` with burst `i+1` and priority `i`
    pub fn staircase(count: usize) -> Vec<ProcessSpec> {
        (0..count)
            .map(|i| {
                let i = i as i64;
                ProcessSpec::new(format!("P{}", i + 1), i, i + 2).with_priority(i + 1)
            })
            .collect()
    }
}

fn exponential(name: &str, mean: f64) -> Result<Exp<f64>> {
    if !(mean.is_finite() && mean > 0.0) {
        return Err(SchedError::config(format!("{name} must be positive, got {mean}")));
    }
    Exp::new(1.0 / mean).map_err(|e| SchedError::config(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpusched_core::validate_processes;

    #[test]
    fn test_generated_sets_are_valid() {
        for seed in 0..50 {
            let processes = WorkloadGenerator::new(seed).generate(25).unwrap();

            assert_eq!(processes.len(), 25);
            assert_eq!(processes[0].arrival, 0);
            assert!(validate_processes(&processes, true).is_ok());
            assert!(processes.windows(2).all(|w| w[0].arrival <= w[1].arrival));
            assert!(processes.iter().all(|p| (1..=5).contains(&p.priority.unwrap())));
        }
    }

    #[test]
    fn test_same_seed_same_workload() {
        let generator = WorkloadGenerator::new(42).with_mean_burst(8.0);
        assert_eq!(generator.generate(30).unwrap(), generator.generate(30).unwrap());
    }

    #[test]
    fn test_invalid_generator_config() {
        assert!(WorkloadGenerator::new(1).generate(0).is_err());
        assert!(WorkloadGenerator::new(1).with_mean_burst(0.0).generate(3).is_err());
        assert!(WorkloadGenerator::new(1).with_mean_interarrival(f64::NAN).generate(3).is_err());
        assert!(WorkloadGenerator::new(1).with_priority_levels(0).generate(3).is_err());
    }

    #[test]
    fn test_staircase() {
        let processes = WorkloadGenerator::staircase(3);

        assert_eq!(
            processes,
            vec![
                ProcessSpec::new("P1", 0, 2).with_priority(1),
                ProcessSpec::new("P2", 1, 3).with_priority(2),
                ProcessSpec::new("P3", 2, 4).with_priority(3),
            ]
        );
    }

    #[test]
    fn test_load_and_write_round_trip_through_file() {
        let path =
            std::env::temp_dir().join(format!("cpusched-workload-{}.json", std::process::id()));
        let processes = WorkloadGenerator::staircase(4);

        write_json(&path, &processes).unwrap();
        let loaded = load_processes(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, processes);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_processes("/nonexistent/cpusched/processes.json").unwrap_err();
        assert!(matches!(err, SchedError::Io(_)));
    }
}
