//! Driver configuration
//!
//! Every tunable the driver needs is carried by [`DriverConfig`], which is
//! handed to [`crate::BConsole::new`] at construction time. There is no
//! process-wide settings lookup; callers that want file-based settings load
//! them explicitly through [`loader::ConfigLoader`].

pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for launching and talking to the console program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Console executable, either a bare name resolved on `PATH` or a path
    pub console_path: PathBuf,

    /// Persistent console configuration used when no ephemeral artifact is in play
    pub config_file: PathBuf,

    /// Extra arguments appended after `-n -c <config>`
    pub extra_args: Vec<String>,

    /// Directory for ephemeral session artifacts (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,

    /// Upper bound for one polling read attempt
    pub poll_timeout_ms: u64,

    /// Once output starts flowing, stop reading after this much silence
    pub poll_quiet_ms: u64,

    /// Upper bound for a synchronous command round trip
    pub command_timeout_secs: u64,

    /// Time allowed between SIGTERM and SIGKILL when terminating a session
    pub terminate_grace_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            console_path: PathBuf::from("bconsole"),
            config_file: PathBuf::from("/etc/bacula/bconsole.conf"),
            extra_args: Vec::new(),
            temp_dir: None,
            poll_timeout_ms: 1000,
            poll_quiet_ms: 100,
            command_timeout_secs: 30,
            terminate_grace_ms: 500,
        }
    }
}

impl DriverConfig {
    /// Bound for one polling read attempt
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Silence that ends a polling read once data has arrived
    pub fn poll_quiet(&self) -> Duration {
        Duration::from_millis(self.poll_quiet_ms)
    }

    /// Bound for a synchronous command
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Grace period before a terminated console is killed
    pub fn terminate_grace(&self) -> Duration {
        Duration::from_millis(self.terminate_grace_ms)
    }

    /// Check the settings for values the executors cannot work with
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.console_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyConsolePath);
        }
        if self.poll_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("poll_timeout_ms"));
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout("command_timeout_secs"));
        }
        if self.command_timeout_secs > 3600 {
            return Err(ConfigError::CommandTimeoutTooLong(self.command_timeout_secs));
        }
        if self.poll_quiet_ms > self.poll_timeout_ms {
            return Err(ConfigError::QuietExceedsPoll {
                quiet: self.poll_quiet_ms,
                poll: self.poll_timeout_ms,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Console path cannot be empty")]
    EmptyConsolePath,

    #[error("{0} must be greater than 0")]
    ZeroTimeout(&'static str),

    #[error("Command timeout of {0}s exceeds 1 hour (3600 seconds)")]
    CommandTimeoutTooLong(u64),

    #[error("Poll quiet interval ({quiet}ms) cannot exceed poll timeout ({poll}ms)")]
    QuietExceedsPoll { quiet: u64, poll: u64 },
}

impl ConfigError {
    /// Name of the offending setting
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::EmptyConsolePath => "console_path",
            ConfigError::ZeroTimeout(field) => field,
            ConfigError::CommandTimeoutTooLong(_) => "command_timeout_secs",
            ConfigError::QuietExceedsPoll { .. } => "poll_quiet_ms",
        }
    }
}
