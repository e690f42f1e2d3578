//! Caller-facing console operations
//!
//! [`BConsole`] exposes two ways of talking to the director:
//!
//! - the synchronous executor ([`BConsole::send_command`]) starts a fresh
//!   console, sends one command, closes the input and collects everything
//!   the console prints before it exits. The typed operations (mount,
//!   label, estimate, ...) are built on it.
//! - the polling executor ([`BConsole::send_command_by_polling`]) keeps a
//!   console running between calls and returns after one bounded read, so
//!   a web request never waits on a long-running command.

use crate::config::DriverConfig;
use crate::console::commands::{
    is_session_terminating, validate_raw_command, ConsoleCommand, DeleteTarget, LabelRequest,
    QUIT_REFUSAL,
};
use crate::console::{ConsoleLauncher, ProcessLauncher, ReadBounds, SessionProcess, TempConfigSession};
use crate::error::Result;
use crate::models::{CommandOutcome, ConnectionSpec, DisabledJob, Estimate, UpcomingJob};
use crate::parsers::{self, signals};

/// Console driver bound to one launcher
pub struct BConsole<L: ProcessLauncher = ConsoleLauncher> {
    config: DriverConfig,
    launcher: L,
}

impl BConsole<ConsoleLauncher> {
    /// Driver for the console's persistent configuration file
    pub fn new(config: DriverConfig) -> Self {
        let launcher = ConsoleLauncher::from_config(&config);
        Self { config, launcher }
    }

    /// Driver bound to a generated configuration for `spec`
    ///
    /// The configuration file is removed when the returned session is
    /// dropped or closed.
    pub fn from_temp_config(spec: &ConnectionSpec, config: DriverConfig) -> Result<TempConfigSession> {
        TempConfigSession::new(spec, config)
    }
}

impl<L: ProcessLauncher> BConsole<L> {
    pub fn with_launcher(config: DriverConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Run one command in a fresh console and return `(stdout, stderr)`
    ///
    /// # Errors
    /// Startup errors when the console cannot be launched,
    /// `InvalidArgument` for a command containing a line break.
    pub async fn send_command(&self, command: &str) -> Result<(String, String)> {
        validate_raw_command(command)?;

        let mut process = self.launcher.launch().await?;
        let result = process
            .communicate(command, self.config.command_timeout())
            .await;
        if process.info().is_running() {
            process.terminate().await?;
        }
        result
    }

    /// Typed command through the synchronous executor
    ///
    /// A console that dies mid-exchange is a failed exchange, not an error.
    async fn exchange(&self, command: ConsoleCommand) -> Result<(String, String)> {
        let line = command.render()?;
        match self.send_command(&line).await {
            Err(e) if e.is_process_lost() => {
                warn!("Console lost while running '{}': {}", line, e);
                Ok((String::new(), e.to_string()))
            }
            other => other,
        }
    }

    async fn accepted(&self, command: ConsoleCommand, success: &str) -> Result<bool> {
        let (stdout, stderr) = self.exchange(command).await?;
        Ok(parsers::response_accepted(&stdout, &stderr, success))
    }

    /// Whether the director answers with a version banner
    pub async fn is_running(&self) -> Result<bool> {
        let (stdout, stderr) = self.exchange(ConsoleCommand::Version).await?;
        Ok(parsers::reports_version(&stdout, &stderr))
    }

    /// Scheduled jobs from `status dir`, in report order
    pub async fn get_upcoming_jobs(&self) -> Result<Vec<UpcomingJob>> {
        let (stdout, _) = self.exchange(ConsoleCommand::StatusDirector).await?;
        Ok(parsers::parse_upcoming_jobs(&stdout))
    }

    /// Jobs currently disabled on the director
    pub async fn get_disabled_jobs(&self) -> Result<Vec<DisabledJob>> {
        let (stdout, _) = self.exchange(ConsoleCommand::ShowDisabled).await?;
        Ok(parsers::parse_disabled_jobs(&stdout))
    }

    pub async fn mount_storage(&self, storage: &str, drive: &str) -> Result<bool> {
        let command = ConsoleCommand::Mount {
            storage: storage.to_string(),
            drive: drive.to_string(),
        };
        self.accepted(command, signals::MOUNTED).await
    }

    pub async fn unmount_storage(&self, storage: &str) -> Result<bool> {
        let command = ConsoleCommand::Unmount {
            storage: storage.to_string(),
        };
        self.accepted(command, signals::UNMOUNTED).await
    }

    /// Delete a volume or a job from the catalog
    pub async fn delete(&self, target: DeleteTarget) -> Result<bool> {
        self.accepted(ConsoleCommand::Delete(target), signals::DELETED)
            .await
    }

    pub async fn create_label(&self, request: LabelRequest) -> Result<bool> {
        self.accepted(ConsoleCommand::Label(request), signals::LABEL_CREATED)
            .await
    }

    pub async fn disable_job(&self, name: &str) -> Result<bool> {
        self.accepted(ConsoleCommand::DisableJob(name.to_string()), signals::DISABLED)
            .await
    }

    pub async fn enable_job(&self, name: &str) -> Result<bool> {
        self.accepted(ConsoleCommand::EnableJob(name.to_string()), signals::ENABLED)
            .await
    }

    /// File and byte counts the next run of `name` would back up
    ///
    /// [`Estimate::UNKNOWN`] when the console does not report them.
    pub async fn estimate_job(&self, name: &str) -> Result<Estimate> {
        let (stdout, _) = self
            .exchange(ConsoleCommand::Estimate(name.to_string()))
            .await?;
        Ok(parsers::parse_estimate(&stdout))
    }

    /// Send a command to a long-lived console and read once
    ///
    /// Without a process, a console is launched and `command` is written to
    /// it. With one, the command is assumed to be in flight already and is
    /// not sent again; only the next read happens. Either way the process
    /// comes back to the caller, who must eventually
    /// [`terminate`](SessionProcess::terminate) it.
    ///
    /// A process that has died yields an error outcome. `quit` and `exit`
    /// are never forwarded.
    ///
    /// # Errors
    /// Startup errors when a console has to be launched and cannot be.
    pub async fn send_command_by_polling(
        &self,
        command: &str,
        process: Option<L::Process>,
    ) -> Result<(Option<L::Process>, CommandOutcome)> {
        if is_session_terminating(command) {
            debug!("Refusing to forward '{}'", command.trim());
            return Ok((process, CommandOutcome::captured(QUIT_REFUSAL)));
        }

        let mut process = match process {
            Some(process) => process,
            None => {
                validate_raw_command(command)?;
                let mut process = self.launcher.launch().await?;
                if let Err(e) = process.write_command(command).await {
                    warn!("Could not send '{}' to new console: {}", command, e);
                    return Ok((Some(process), CommandOutcome::error(e.to_string())));
                }
                process
            }
        };

        let bounds = ReadBounds::new(self.config.poll_timeout(), self.config.poll_quiet());
        let outcome = match process.read_bounded(bounds).await {
            Ok(chunk) => {
                if !chunk.stderr.is_empty() {
                    debug!("Console stderr: {}", chunk.stderr.trim_end());
                }
                CommandOutcome::captured(parsers::render_html(&chunk.stdout))
            }
            Err(e) => {
                info!("Polling console {} failed: {}", process.info().id, e);
                CommandOutcome::error(e.to_string())
            }
        };

        Ok((Some(process), outcome))
    }
}
