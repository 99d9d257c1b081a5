//! CPU Scheduling Simulation CLI
//!
//! Command-line interface for running and comparing scheduling policies
//!
//! ```bash
//! # Round Robin over an inline process set
//! cpusched-sim run --policy rr --quantum 2 --process P1:0:5 --process P2:1:3
//!
//! # Compare policies on 20 synthetic processes
//! cpusched-sim compare --random 20 --seed 7 --policies fcfs,sjf,srtf,rr
//! ```

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cpusched_core::ProcessSpec;
use cpusched_simulation_engine::{
    Policy, Schedule, WorkloadGenerator, best_by_waiting, compare_policies, load_processes, run,
    summarize, write_json,
};

#[derive(Parser, Debug)]
#[command(name = "cpusched-sim")]
#[command(about = "Simulate classical CPU scheduling policies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one policy and print per-process results and the timeline
    Run {
        /// Policy (fcfs, sjf, srtf, priority, priority-preemptive, rr)
        #[arg(short, long, default_value = "fcfs")]
        policy: Policy,

        #[command(flatten)]
        workload: WorkloadArgs,
    },

    /// Run several policies over the same process set and compare averages
    Compare {
        /// Policies to compare (comma-separated)
        #[arg(
            short,
            long,
            value_delimiter = ',',
            default_value = "fcfs,sjf,srtf,priority,priority-preemptive,rr"
        )]
        policies: Vec<Policy>,

        #[command(flatten)]
        workload: WorkloadArgs,
    },
}

#[derive(Args, Debug)]
struct WorkloadArgs {
    /// JSON file with an array of processes
    #[arg(short, long, conflicts_with_all = ["process", "random"])]
    input: Option<String>,

    /// Inline process as id:arrival:burst[:priority] (repeatable)
    #[arg(long, conflicts_with = "random")]
    process: Vec<ProcessSpec>,

    /// Generate this many synthetic processes
    #[arg(short, long)]
    random: Option<usize>,

    /// Seed for synthetic processes
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Mean gap between synthetic arrivals
    #[arg(long, default_value_t = 2.0)]
    mean_interarrival: f64,

    /// Mean synthetic burst
    #[arg(long, default_value_t = 5.0)]
    mean_burst: f64,

    /// Synthetic priorities are drawn from 1..=levels
    #[arg(long, default_value_t = 5)]
    priority_levels: i64,

    /// Round Robin time quantum
    #[arg(short, long, env = "CPUSCHED_QUANTUM", default_value_t = 2)]
    quantum: i64,

    /// Output JSON file path (optional)
    #[arg(short, long)]
    output: Option<String>,
}

impl WorkloadArgs {
    fn processes(&self) -> anyhow::Result<Vec<ProcessSpec>> {
        if let Some(path) = &self.input {
            return load_processes(path)
                .with_context(|| format!("Failed to load processes from {path}"));
        }
        if let Some(count) = self.random {
            let processes = WorkloadGenerator::new(self.seed)
                .with_mean_interarrival(self.mean_interarrival)
                .with_mean_burst(self.mean_burst)
                .with_priority_levels(self.priority_levels)
                .generate(count)?;
            return Ok(processes);
        }
        if self.process.is_empty() {
            // Default form of the interactive tool: P1..P4 in a staircase
            return Ok(WorkloadGenerator::staircase(4));
        }
        Ok(self.process.clone())
    }
}

fn print_schedule(schedule: &Schedule) {
    println!(
        "{:<8} {:>8} {:>6} {:>9} {:>6} {:>11} {:>11} {:>8}",
        "Process", "Arrival", "Burst", "Priority", "Start", "Completion", "Turnaround", "Waiting"
    );
    println!("{}", "-".repeat(75));

    for r in &schedule.results {
        let priority = r.priority.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        let start = r.start.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:>8} {:>6} {:>9} {:>6} {:>11} {:>11} {:>8}",
            r.id, r.arrival, r.burst, priority, start, r.completion, r.turnaround, r.waiting
        );
    }

    let summary = summarize(schedule);
    println!("\nAverage turnaround: {:.2}", summary.avg_turnaround);
    println!("Average waiting:    {:.2}", summary.avg_waiting);
    println!("Average response:   {:.2}", summary.avg_response);
    println!("CPU utilization:    {:.1}%", summary.cpu_utilization * 100.0);
    println!("Context switches:   {}", summary.context_switches);

    println!("\nTimeline:");
    let segments: Vec<String> = schedule
        .timeline
        .iter()
        .map(|s| format!("{} [{}-{})", s.process_id, s.start, s.end))
        .collect();
    println!("  {}", segments.join(" | "));
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cpusched=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { policy, workload } => {
            let processes = workload.processes()?;
            info!(policy = %policy, processes = processes.len(), "running simulation");

            let quantum = policy.requires_quantum().then_some(workload.quantum);
            let schedule = run(policy, &processes, quantum)
                .with_context(|| format!("{policy} simulation failed"))?;

            println!("╔══════════════════════════════════════════════════════════╗");
            let mode = if policy.is_preemptive() { "preemptive" } else { "non-preemptive" };
            println!("║  {:<56}║", format!("{} Scheduling ({mode})", schedule.policy));
            println!("╚══════════════════════════════════════════════════════════╝\n");
            print_schedule(&schedule);

            if let Some(output_path) = workload.output {
                write_json(&output_path, &schedule)
                    .with_context(|| format!("Failed to write {output_path}"))?;
                println!("\nResults saved to {output_path}");
            }
        }

        Commands::Compare { policies, workload } => {
            if policies.is_empty() {
                bail!("no policies to compare");
            }
            let processes = workload.processes()?;
            info!(policies = policies.len(), processes = processes.len(), "comparing policies");

            let rows = compare_policies(&processes, &policies, workload.quantum)
                .context("Comparison failed")?;

            println!("╔══════════════════════════════════════════════════════════╗");
            println!(
                "║  Policy Comparison ({:>3} processes, quantum {:>3})         ║",
                processes.len(),
                workload.quantum
            );
            println!("╚══════════════════════════════════════════════════════════╝\n");

            println!(
                "{:<16} {:>15} {:>12} {:>13} {:>10} {:>10}",
                "Policy", "Avg Turnaround", "Avg Waiting", "Avg Response", "CPU Util", "Switches"
            );
            println!("{}", "-".repeat(81));
            for row in &rows {
                println!(
                    "{:<16} {:>15.2} {:>12.2} {:>13.2} {:>9.1}% {:>10}",
                    row.policy_name(),
                    row.avg_turnaround,
                    row.avg_waiting,
                    row.avg_response,
                    row.cpu_utilization * 100.0,
                    row.context_switches,
                );
            }

            if let Some(best) = best_by_waiting(&rows) {
                println!(
                    "\nLowest average waiting time: {} ({:.2})",
                    best.policy_name(),
                    best.avg_waiting
                );
            }

            if let Some(output_path) = workload.output {
                write_json(&output_path, &rows)
                    .with_context(|| format!("Failed to write {output_path}"))?;
                println!("\nResults saved to {output_path}");
            }
        }
    }

    Ok(())
}
