//! Console session management
//!
//! Everything that touches the console program itself: launching it,
//! bounded reads on its pipes, the generated configuration file and the
//! command lines written to it.

pub mod commands;
pub mod operations;
pub mod process;
pub mod streams;
pub mod temp_config;

pub use commands::{ConsoleCommand, DeleteTarget, LabelRequest, LabelSource, QUIT_REFUSAL};
pub use operations::{ProcessLauncher, ReadBounds, ReadChunk, SessionProcess};
pub use process::{spawn_console_process, ConsoleLauncher, ConsoleProcess};
pub use streams::{ConsoleStreams, StreamStats};
pub use temp_config::{render_session_config, SessionArtifact, TempConfigSession};
