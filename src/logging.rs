//! Logging setup
//!
//! The driver only emits `tracing` events; installing a subscriber is up to
//! the embedding application. These helpers install the compact fmt
//! subscriber used by the tests and by simple embedders.

use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, or `default_directive` when unset
fn env_filter(default_directive: &str) -> EnvFilter {
    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| default_directive.to_string());
    EnvFilter::from(directive)
}

/// Install a global fmt subscriber
///
/// # Panics
/// If a global subscriber has already been installed. Use
/// [`try_init_logging`] when that may happen.
pub fn init_logging(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Install a global fmt subscriber unless one is already set
///
/// Returns whether this call installed it.
pub fn try_init_logging(default_directive: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_target(false)
        .compact()
        .try_init()
        .is_ok()
}
