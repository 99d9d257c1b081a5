//! CPU Scheduling Core - Shared types for the simulation engine
//!
//! This crate defines the data model every scheduling policy works on:
//! - `ProcessSpec` (immutable input) and `ProcessResult` (per-run output)
//! - `Timeline` recorder that merges adjacent same-process intervals
//! - Input validation performed once, before any simulation starts
//! - Error types

pub mod error;
pub mod timeline;
pub mod types;
pub mod validate;

pub use error::*;
pub use timeline::*;
pub use types::*;
pub use validate::*;
