//! Error types and Result aliases for the console driver

use std::fmt;
use std::path::PathBuf;

/// Result type alias for console driver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the console driver
///
/// Only environmental failures (missing executable, unreadable artifact,
/// broken pipes) travel through this type to callers of the high-level
/// operations. Daemon-side refusals are folded into `false` or a sentinel.
#[derive(Debug)]
pub enum Error {
    // === Startup errors ===
    /// Console executable could not be located
    ConsoleNotFound {
        program: PathBuf,
    },

    /// Console executable was found but could not be spawned
    SpawnFailed {
        program: PathBuf,
        reason: String,
    },

    /// Configuration artifact handed to the launcher cannot be read
    ArtifactUnreadable {
        path: PathBuf,
        reason: String,
    },

    /// Failed to create or write the ephemeral configuration artifact
    ArtifactCreateFailed {
        reason: String,
    },

    /// A child pipe was not available after spawning
    PipeUnavailable {
        stream: &'static str,
    },

    // === Session errors ===
    /// Process has terminated and can no longer be used
    ProcessLost {
        id: String,
        reason: String,
    },

    /// Failed to write a command to the console input
    CommandWriteFailed {
        command: String,
        reason: String,
    },

    /// Failed to read from the console output
    ReadFailed {
        stream: &'static str,
        reason: String,
    },

    /// Failed to deliver a signal to the console process
    SignalSendFailed {
        signal: String,
        reason: String,
    },

    // === Command templating errors ===
    /// Argument cannot be rendered into an unambiguous console command
    InvalidArgument {
        field: &'static str,
        reason: String,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),
}

impl Error {
    /// Whether this error prevented the console from starting at all
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self,
            Error::ConsoleNotFound { .. }
                | Error::SpawnFailed { .. }
                | Error::ArtifactUnreadable { .. }
                | Error::ArtifactCreateFailed { .. }
                | Error::PipeUnavailable { .. }
        )
    }

    /// Whether this error means the console process is gone
    pub fn is_process_lost(&self) -> bool {
        matches!(self, Error::ProcessLost { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Startup errors
            Error::ConsoleNotFound { program } => {
                write!(f, "Console program '{}' not found", program.display())
            }
            Error::SpawnFailed { program, reason } => {
                write!(f, "Failed to spawn '{}': {}", program.display(), reason)
            }
            Error::ArtifactUnreadable { path, reason } => {
                write!(
                    f,
                    "Console configuration '{}' is not readable: {}",
                    path.display(),
                    reason
                )
            }
            Error::ArtifactCreateFailed { reason } => {
                write!(f, "Failed to create session configuration: {}", reason)
            }
            Error::PipeUnavailable { stream } => {
                write!(f, "Console {} pipe is not available", stream)
            }

            // Session errors
            Error::ProcessLost { id, reason } => {
                write!(f, "Console process '{}' is no longer running: {}", id, reason)
            }
            Error::CommandWriteFailed { command, reason } => {
                write!(f, "Failed to send command '{}': {}", command, reason)
            }
            Error::ReadFailed { stream, reason } => {
                write!(f, "Failed to read console {}: {}", stream, reason)
            }
            Error::SignalSendFailed { signal, reason } => {
                write!(f, "Failed to send signal '{}': {}", signal, reason)
            }

            // Templating errors
            Error::InvalidArgument { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Toml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Error::ConfigValidationFailed {
            field: err.field().to_string(),
            reason: err.to_string(),
        }
    }
}
