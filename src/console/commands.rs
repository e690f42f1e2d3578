//! Console command templating
//!
//! Each operation renders to exactly one command line. Values with
//! whitespace are double-quoted; values that would break the line or the
//! quoting are refused before any process is started.

use crate::error::{Error, Result};

/// Reply given in place of forwarding a session-terminating command
pub const QUIT_REFUSAL: &str = "Try harder.";

/// What a `delete` removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A volume by name
    Volume(String),
    /// A job by numeric id
    JobId(u64),
}

/// Where the label of a new volume comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    /// An explicit volume name
    Volume(String),
    /// Barcodes read by the autochanger
    Barcodes,
}

/// Parameters of a `label` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRequest {
    pub pool: String,
    pub storage: Option<String>,
    pub source: LabelSource,
}

impl LabelRequest {
    /// Label one volume with an explicit name
    pub fn named(pool: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            storage: None,
            source: LabelSource::Volume(label.into()),
        }
    }

    /// Label every volume found by barcode
    pub fn barcodes(pool: impl Into<String>) -> Self {
        Self {
            pool: pool.into(),
            storage: None,
            source: LabelSource::Barcodes,
        }
    }

    pub fn on_storage(mut self, storage: impl Into<String>) -> Self {
        self.storage = Some(storage.into());
        self
    }
}

/// A command understood by the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Version,
    StatusDirector,
    ShowDisabled,
    Mount { storage: String, drive: String },
    Unmount { storage: String },
    Delete(DeleteTarget),
    Label(LabelRequest),
    DisableJob(String),
    EnableJob(String),
    Estimate(String),
}

impl ConsoleCommand {
    /// Render the command line, without the terminator
    ///
    /// # Errors
    /// `InvalidArgument` when a value is empty or contains a control
    /// character or a double quote.
    pub fn render(&self) -> Result<String> {
        let line = match self {
            ConsoleCommand::Version => "version".to_string(),
            ConsoleCommand::StatusDirector => "status dir".to_string(),
            ConsoleCommand::ShowDisabled => "show disabled".to_string(),
            ConsoleCommand::Mount { storage, drive } => format!(
                "mount storage={} drive={}",
                quote_value("storage", storage)?,
                quote_value("drive", drive)?
            ),
            ConsoleCommand::Unmount { storage } => {
                format!("unmount storage={}", quote_value("storage", storage)?)
            }
            ConsoleCommand::Delete(DeleteTarget::Volume(volume)) => {
                format!("delete volume={} yes", quote_value("volume", volume)?)
            }
            ConsoleCommand::Delete(DeleteTarget::JobId(id)) => format!("delete jobid={}", id),
            ConsoleCommand::Label(request) => render_label(request)?,
            ConsoleCommand::DisableJob(name) => {
                format!("disable job={}", quote_value("job", name)?)
            }
            ConsoleCommand::EnableJob(name) => format!("enable job={}", quote_value("job", name)?),
            ConsoleCommand::Estimate(name) => {
                format!("estimate job={}", quote_value("job", name)?)
            }
        };
        Ok(line)
    }
}

fn render_label(request: &LabelRequest) -> Result<String> {
    let mut line = match &request.source {
        LabelSource::Volume(label) => format!(
            "label volume={} pool={}",
            quote_value("volume", label)?,
            quote_value("pool", &request.pool)?
        ),
        LabelSource::Barcodes => format!("label barcodes pool={}", quote_value("pool", &request.pool)?),
    };
    if let Some(storage) = &request.storage {
        line.push_str(" storage=");
        line.push_str(&quote_value("storage", storage)?);
    }
    line.push_str(" yes");
    Ok(line)
}

/// Render one `key=value` value
pub fn quote_value(field: &'static str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument {
            field,
            reason: "value is empty".to_string(),
        });
    }
    if value.chars().any(char::is_control) {
        return Err(Error::InvalidArgument {
            field,
            reason: "value contains a control character".to_string(),
        });
    }
    if value.contains('"') {
        return Err(Error::InvalidArgument {
            field,
            reason: "value contains a double quote".to_string(),
        });
    }

    if value.chars().any(char::is_whitespace) {
        Ok(format!("\"{}\"", value))
    } else {
        Ok(value.to_string())
    }
}

/// Check a free-form command before it is written to a console
///
/// A line break would smuggle a second command into the session.
pub fn validate_raw_command(command: &str) -> Result<()> {
    if command.contains(['\n', '\r']) {
        return Err(Error::InvalidArgument {
            field: "command",
            reason: "command contains a line break".to_string(),
        });
    }
    Ok(())
}

/// `quit` and `exit` would end the session from under the driver
pub fn is_session_terminating(command: &str) -> bool {
    let command = command.trim();
    command.eq_ignore_ascii_case("quit") || command.eq_ignore_ascii_case("exit")
}
