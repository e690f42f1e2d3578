//! Console Process Model
//!
//! Tracks the lifecycle of a console process independently of the OS
//! handle, so a dead session is a representable state rather than an
//! error to catch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a console process; transitions only move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProcessState {
    /// Handle exists but nothing has been spawned yet
    #[default]
    NotStarted,
    /// Process is running and may be written to and read from
    Running,
    /// Process has exited or was terminated; never reused
    Terminated,
}

/// Bookkeeping for one console process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    /// Unique identifier, stable for the life of the handle
    pub id: String,

    /// OS process identifier
    pub pid: Option<u32>,

    /// Current state of the process
    pub state: ProcessState,

    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the process terminated (if applicable)
    pub end_time: Option<DateTime<Utc>>,

    /// Exit code, if the process exited normally
    pub exit_code: Option<i32>,

    /// Program that was executed
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,
}

impl ProcessInfo {
    /// Create a new record in the NotStarted state
    pub fn new(program: String, args: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            pid: None,
            state: ProcessState::NotStarted,
            start_time: None,
            end_time: None,
            exit_code: None,
            program,
            args,
        }
    }

    /// Mark the process as started with the given PID
    ///
    /// Ignored unless the process has not been started yet.
    pub fn mark_started(&mut self, pid: Option<u32>) {
        if self.state != ProcessState::NotStarted {
            return;
        }
        self.pid = pid;
        self.state = ProcessState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the process as terminated
    ///
    /// The first call wins; later calls keep the original end time and code.
    pub fn mark_terminated(&mut self, exit_code: Option<i32>) {
        if self.state == ProcessState::Terminated {
            return;
        }
        self.state = ProcessState::Terminated;
        self.end_time = Some(Utc::now());
        self.exit_code = exit_code;
    }

    /// Check if the process is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.state, ProcessState::Running)
    }

    /// Check if the process has terminated
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    /// Get the run time if the process has terminated
    pub fn execution_duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some(end.signed_duration_since(start).to_std().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Get a display string for the process
    pub fn display_string(&self) -> String {
        let state_str = match self.state {
            ProcessState::NotStarted => "NotStarted",
            ProcessState::Running => "Running",
            ProcessState::Terminated => "Terminated",
        };

        let pid_str = self.pid.map_or("N/A".to_string(), |pid| pid.to_string());

        format!(
            "{} [{}] - {} {} {}",
            self.program,
            pid_str,
            state_str,
            self.args.join(" "),
            self.exit_code
                .map_or(String::new(), |code| format!("(exit: {})", code))
        )
    }
}

impl std::fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_string())
    }
}
