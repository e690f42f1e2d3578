//! Polling Outcome Model

use serde::{Deserialize, Serialize};

/// Result of a polling attempt
///
/// Serializes to `{"commands": [...]}` or `{"error": "..."}`, the shapes the
/// web layer interpolates into its responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandOutcome {
    /// Display-ready text, one entry per polling attempt
    Commands(Vec<String>),
    /// The session is no longer usable
    Error(String),
}

impl CommandOutcome {
    /// Outcome carrying a single captured entry
    pub fn captured(text: impl Into<String>) -> Self {
        CommandOutcome::Commands(vec![text.into()])
    }

    /// Outcome reporting a lost session
    pub fn error(message: impl Into<String>) -> Self {
        CommandOutcome::Error(message.into())
    }

    /// Captured entries, if this is not an error
    pub fn commands(&self) -> Option<&[String]> {
        match self {
            CommandOutcome::Commands(entries) => Some(entries),
            CommandOutcome::Error(_) => None,
        }
    }

    /// Error diagnostic, if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            CommandOutcome::Commands(_) => None,
            CommandOutcome::Error(message) => Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CommandOutcome::Error(_))
    }

    /// JSON rendering for the web layer
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
