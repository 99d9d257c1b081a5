//! Error types for scheduling simulation

use thiserror::Error;

/// Simulation result type
pub type Result<T> = std::result::Result<T, SchedError>;

/// Errors that can occur before, during or after a simulation run
#[derive(Error, Debug)]
pub enum SchedError {
    /// Input rejected at the boundary; the simulation never started
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An algorithm produced a result that breaks a scheduling invariant
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Invalid generator or CLI configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchedError {
    /// Create an invalid input error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an invariant violation error
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The process set was empty
    pub fn empty_process_set() -> Self {
        Self::invalid("process set is empty")
    }

    /// A process declared a negative arrival time
    pub fn negative_arrival(id: &str, arrival: i64) -> Self {
        Self::invalid(format!("process {id} has negative arrival {arrival}"))
    }

    /// A process declared a zero or negative burst
    pub fn non_positive_burst(id: &str, burst: i64) -> Self {
        Self::invalid(format!("process {id} has non-positive burst {burst}"))
    }

    /// Two processes share the same id
    pub fn duplicate_id(id: &str) -> Self {
        Self::invalid(format!("duplicate process id {id}"))
    }

    /// A priority policy was selected but a process has no priority
    pub fn missing_priority(id: &str) -> Self {
        Self::invalid(format!("process {id} has no priority"))
    }

    /// Round Robin was selected without a quantum
    pub fn missing_quantum() -> Self {
        Self::invalid("round robin requires a time quantum")
    }

    /// Round Robin was selected with a zero or negative quantum
    pub fn non_positive_quantum(quantum: i64) -> Self {
        Self::invalid(format!("time quantum must be positive, got {quantum}"))
    }

    /// Last arrival plus total burst does not fit in simulated time
    pub fn time_horizon_overflow() -> Self {
        Self::invalid("latest arrival plus total burst overflows simulated time")
    }

    /// Whether this error was raised at the input boundary
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
