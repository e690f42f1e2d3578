//! Console Session Capabilities
//!
//! The executors never touch `tokio::process` directly; they talk to a
//! [`SessionProcess`] obtained from a [`ProcessLauncher`]. The real
//! implementation is [`super::ConsoleProcess`], and test doubles implement
//! the same traits to script console replies.

use crate::error::Result;
use crate::models::{ProcessInfo, ProcessState};
use async_trait::async_trait;
use std::time::Duration;

/// Limits for one bounded read attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBounds {
    /// Never wait longer than this in total
    pub timeout: Duration,
    /// After the first bytes arrive, stop once the console is silent this long
    pub quiet: Duration,
}

impl ReadBounds {
    pub fn new(timeout: Duration, quiet: Duration) -> Self {
        Self {
            timeout,
            quiet: quiet.min(timeout),
        }
    }
}

/// Text captured by one read attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadChunk {
    /// Normal output
    pub stdout: String,
    /// Error output
    pub stderr: String,
    /// Both output streams reached end of file
    pub closed: bool,
}

impl ReadChunk {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// A live console session: write commands, read output, check liveness
///
/// Methods take `&mut self`; a session is used from one call site at a
/// time and handed on by value.
#[async_trait]
pub trait SessionProcess: Send {
    /// Lifecycle bookkeeping
    fn info(&self) -> &ProcessInfo;

    /// Current state tag, as last observed
    fn state(&self) -> ProcessState {
        self.info().state
    }

    /// Write one command followed by the line terminator
    ///
    /// # Errors
    /// `ProcessLost` if the session has terminated; nothing is written.
    async fn write_command(&mut self, command: &str) -> Result<()>;

    /// Collect whatever output arrives within `bounds`
    ///
    /// # Errors
    /// `ProcessLost` if the session terminated before or during the read.
    async fn read_bounded(&mut self, bounds: ReadBounds) -> Result<ReadChunk>;

    /// Send a command, close the input and read until the console exits
    ///
    /// Returns `(stdout, stderr)`. On timeout the console is killed and the
    /// text captured so far is returned.
    async fn communicate(&mut self, command: &str, timeout: Duration) -> Result<(String, String)>;

    /// Refresh the state tag from the OS and report whether it is Running
    async fn is_alive(&mut self) -> bool;

    /// Stop the session and release the OS process
    async fn terminate(&mut self) -> Result<()>;
}

/// Something that can start console sessions
#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    type Process: SessionProcess;

    /// Start a new console session
    ///
    /// Returns as soon as the process exists; readiness is established by
    /// the first exchange.
    async fn launch(&self) -> Result<Self::Process>;
}
