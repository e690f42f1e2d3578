//! bconsole-driver - drive the Bacula director console from async Rust
//!
//! The director's only control surface is `bconsole`, an interactive
//! line-oriented program. This crate turns a console session into
//! request/response and incremental-polling operations that never block a
//! web worker indefinitely.
//!
//! ## Module Organization
//!
//! - [`bconsole`] - the caller-facing operations ([`BConsole`])
//! - [`console`] - launching the console, bounded pipe reads, generated
//!   configuration files, command templating
//! - [`parsers`] - job tables, estimates and success detection
//! - [`models`] - connection details, process state, polling outcomes
//! - [`config`] - driver settings and their loader
//! - [`mod@error`] - Error types and Result aliases
//! - [`logging`] - tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```no_run
//! use bconsole_driver::{BConsole, DriverConfig};
//!
//! # async fn run() -> bconsole_driver::Result<()> {
//! let console = BConsole::new(DriverConfig::default());
//! if console.is_running().await? {
//!     for job in console.get_upcoming_jobs().await? {
//!         println!("{} at {} {}", job.name, job.date, job.time);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Long-running commands go through the polling executor, which hands the
//! console back between reads:
//!
//! ```no_run
//! use bconsole_driver::{BConsole, DriverConfig, SessionProcess};
//!
//! # async fn run() -> bconsole_driver::Result<()> {
//! let console = BConsole::new(DriverConfig::default());
//! let (mut process, outcome) = console.send_command_by_polling("status dir", None).await?;
//! println!("{}", outcome.to_json()?);
//!
//! let (process, outcome) = console.send_command_by_polling("status dir", process.take()).await?;
//! println!("{}", outcome.to_json()?);
//!
//! if let Some(mut process) = process {
//!     process.terminate().await?;
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

pub mod bconsole;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod models;
pub mod parsers;

pub use bconsole::BConsole;
pub use config::loader::ConfigLoader;
pub use config::DriverConfig;
pub use console::{
    ConsoleLauncher, ConsoleProcess, DeleteTarget, LabelRequest, LabelSource, ProcessLauncher,
    SessionProcess, TempConfigSession,
};
pub use error::{Error, Result};
pub use models::{
    CommandOutcome, ConnectionSpec, DisabledJob, Estimate, ProcessInfo, ProcessState, UpcomingJob,
};

/// The current version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Load the driver settings, falling back to defaults
///
/// Looks in the standard locations (see [`ConfigLoader`]). A missing or
/// broken file is logged and replaced by [`DriverConfig::default`].
pub fn load_config() -> DriverConfig {
    match ConfigLoader::load() {
        Ok(config) => {
            debug!("{} v{} configuration loaded", NAME, VERSION);
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            DriverConfig::default()
        }
    }
}
