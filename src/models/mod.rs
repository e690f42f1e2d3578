//! Core data models for the console driver
//!
//! This module contains the data structures exchanged between the driver
//! and its callers: director connection details, console process state,
//! polling outcomes and the records extracted from console reports.

pub mod connection;
pub mod estimate;
pub mod job;
pub mod outcome;
pub mod process;

// Re-exports for convenience
pub use connection::ConnectionSpec;
pub use estimate::Estimate;
pub use job::{DisabledJob, UpcomingJob};
pub use outcome::CommandOutcome;
pub use process::{ProcessInfo, ProcessState};
