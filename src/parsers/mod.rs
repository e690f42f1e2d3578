//! Console Response Parsers
//!
//! Pure functions that turn raw console text into structured records or
//! boolean outcomes. None of them fail: malformed input yields an empty
//! list, the estimate sentinel, or `false`.
//!
//! Success detection is substring matching against daemon text. A reworded
//! or localized console silently turns successes into `false`; the
//! keywords live in [`signals`] so they can be audited in one place.

pub mod estimate;
pub mod html;
pub mod jobs;

pub use estimate::parse_estimate;
pub use html::render_html;
pub use jobs::{parse_disabled_jobs, parse_upcoming_jobs};

/// Success keywords for the boolean console operations
pub mod signals {
    pub const VERSION: &str = "Version";
    pub const MOUNTED: &str = "is mounted";
    pub const UNMOUNTED: &str = "unmounted.";
    pub const DELETED: &str = "deleted";
    pub const LABEL_CREATED: &str = "successfully created";
    pub const ENABLED: &str = "enabled";
    pub const DISABLED: &str = "disabled";
    pub const ERROR: &str = "error";
}

/// Whether a synchronous response carries its success keyword
///
/// A response with nothing on stdout (only stderr, or nothing at all) is a
/// failure regardless of the keyword.
pub fn response_accepted(stdout: &str, stderr: &str, success: &str) -> bool {
    if stdout.trim().is_empty() {
        if !stderr.trim().is_empty() {
            debug!("Console answered on stderr only: {}", stderr.trim());
        }
        return false;
    }
    stdout.contains(success)
}

/// Liveness heuristic: a version banner and no literal `error`
pub fn reports_version(stdout: &str, stderr: &str) -> bool {
    if stdout.contains(signals::ERROR) {
        return false;
    }
    response_accepted(stdout, stderr, signals::VERSION)
}
