//! Console Process Spawning
//!
//! Starts the console program with independently piped stdin, stdout and
//! stderr, and implements [`SessionProcess`] on top of the resulting child.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::{Child, Command};
use tokio::time::{timeout, Instant};

use super::operations::{ProcessLauncher, ReadBounds, ReadChunk, SessionProcess};
use super::streams::{ConsoleStreams, StreamStats};
use crate::config::DriverConfig;
use crate::error::{Error, Result};
use crate::models::{ProcessInfo, ProcessState};

/// A running console program
pub struct ConsoleProcess {
    info: ProcessInfo,
    child: Child,
    streams: ConsoleStreams,
    terminate_grace: Duration,
}

/// Spawn `program` with piped stdio
///
/// # Errors
/// `ConsoleNotFound` when the executable does not exist, `SpawnFailed` for
/// any other spawn failure.
pub fn spawn_console_process(
    program: &Path,
    args: &[String],
    terminate_grace: Duration,
) -> Result<ConsoleProcess> {
    let mut info = ProcessInfo::new(program.display().to_string(), args.to_vec());

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConsoleNotFound {
                program: program.to_path_buf(),
            },
            _ => Error::SpawnFailed {
                program: program.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

    let stdin = child
        .stdin
        .take()
        .ok_or(Error::PipeUnavailable { stream: "stdin" })?;
    let stdout = child
        .stdout
        .take()
        .ok_or(Error::PipeUnavailable { stream: "stdout" })?;
    let stderr = child
        .stderr
        .take()
        .ok_or(Error::PipeUnavailable { stream: "stderr" })?;

    info.mark_started(child.id());
    debug!("Started console {}", info);

    Ok(ConsoleProcess {
        info,
        child,
        streams: ConsoleStreams::new(stdin, stdout, stderr),
        terminate_grace,
    })
}

impl ConsoleProcess {
    /// OS process id while running
    pub fn pid(&self) -> Option<u32> {
        self.info.pid
    }

    /// Pipe statistics for this session
    pub fn stats(&self) -> &StreamStats {
        self.streams.stats()
    }

    /// Poll the OS for an exit status and record it
    fn refresh_state(&mut self) {
        if self.info.state != ProcessState::Running {
            return;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                debug!("Console {} exited with {}", self.info.id, status);
                self.info.mark_terminated(status.code());
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Could not query console {} status: {}", self.info.id, e);
                self.info.mark_terminated(None);
            }
        }
    }

    fn lost(&self, reason: impl Into<String>) -> Error {
        Error::ProcessLost {
            id: self.info.id.clone(),
            reason: reason.into(),
        }
    }

    fn ensure_running(&mut self) -> Result<()> {
        self.refresh_state();
        self.check_state()
    }

    fn check_state(&self) -> Result<()> {
        match self.info.state {
            ProcessState::Running => Ok(()),
            ProcessState::NotStarted => Err(self.lost("process was never started")),
            ProcessState::Terminated => Err(self.lost(self.exit_reason())),
        }
    }

    fn exit_reason(&self) -> String {
        match self.info.exit_code {
            Some(code) => format!("process exited with code {}", code),
            None => "process was terminated".to_string(),
        }
    }

    /// Wait briefly for the exit status after the pipes have closed
    async fn reap(&mut self, limit: Duration) {
        if let Ok(Ok(status)) = timeout(limit, self.child.wait()).await {
            self.info.mark_terminated(status.code());
        }
    }

    #[cfg(unix)]
    fn send_sigterm(&self) -> Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.info.pid else {
            return Ok(());
        };
        kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(|e| Error::SignalSendFailed {
            signal: "SIGTERM".to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SessionProcess for ConsoleProcess {
    fn info(&self) -> &ProcessInfo {
        &self.info
    }

    async fn write_command(&mut self, command: &str) -> Result<()> {
        self.ensure_running()?;

        debug!("Console {} <- {}", self.info.id, command);
        if let Err(e) = self.streams.write_line(command).await {
            self.refresh_state();
            if self.info.is_terminated() || e.kind() == ErrorKind::BrokenPipe {
                self.info.mark_terminated(self.info.exit_code);
                return Err(self.lost(format!("console input closed: {}", e)));
            }
            return Err(Error::CommandWriteFailed {
                command: command.to_string(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }

    async fn read_bounded(&mut self, bounds: ReadBounds) -> Result<ReadChunk> {
        // output written just before exiting is still in the pipes, so the
        // exit status is only consulted once they have been drained
        self.check_state()?;

        let deadline = Instant::now() + bounds.timeout;
        let drained = self
            .streams
            .drain(deadline, Some(bounds.quiet))
            .await
            .map_err(|e| Error::ReadFailed {
                stream: "output",
                reason: e.to_string(),
            })?;

        if drained.timed_out {
            trace!("Console {} silent for {:?}", self.info.id, bounds.timeout);
        }

        let closed = self.streams.is_closed();
        if closed {
            self.reap(bounds.quiet).await;
        } else {
            self.refresh_state();
        }
        if self.info.is_terminated() && drained.stdout.is_empty() && drained.stderr.is_empty() {
            let reason = if closed {
                format!("console closed its output, {}", self.exit_reason())
            } else {
                self.exit_reason()
            };
            return Err(self.lost(reason));
        }

        Ok(ReadChunk {
            stdout: drained.stdout,
            stderr: drained.stderr,
            closed,
        })
    }

    async fn communicate(&mut self, command: &str, limit: Duration) -> Result<(String, String)> {
        self.write_command(command).await?;
        self.streams.close_input();

        let deadline = Instant::now() + limit;
        let drained = self
            .streams
            .drain(deadline, None)
            .await
            .map_err(|e| Error::ReadFailed {
                stream: "output",
                reason: e.to_string(),
            })?;

        if self.streams.is_closed() {
            self.reap(self.terminate_grace).await;
        } else {
            warn!(
                "Console {} did not finish '{}' within {:?}, killing it",
                self.info.id, command, limit
            );
            self.terminate().await?;
        }

        Ok((drained.stdout, drained.stderr))
    }

    async fn is_alive(&mut self) -> bool {
        self.refresh_state();
        self.info.is_running()
    }

    async fn terminate(&mut self) -> Result<()> {
        self.refresh_state();
        if self.info.state != ProcessState::Running {
            return Ok(());
        }

        self.streams.close_input();

        #[cfg(unix)]
        if let Err(e) = self.send_sigterm() {
            debug!("SIGTERM to console {} failed: {}", self.info.id, e);
        }

        match timeout(self.terminate_grace, self.child.wait()).await {
            Ok(Ok(status)) => self.info.mark_terminated(status.code()),
            _ => {
                debug!("Console {} ignored SIGTERM, killing", self.info.id);
                self.child.kill().await?;
                self.info.mark_terminated(None);
            }
        }

        info!(
            "Terminated console {} after {:?}",
            self.info.id,
            self.info.execution_duration().unwrap_or_default()
        );
        debug!(
            "Console {} pipes: {} bytes read over {} passes ({:.1} bytes/pass)",
            self.info.id,
            self.streams.stats().bytes_read,
            self.streams.stats().read_operations,
            self.streams.stats().read_throughput()
        );
        Ok(())
    }
}

/// Starts console processes with a fixed program and argument list
#[derive(Debug, Clone)]
pub struct ConsoleLauncher {
    program: PathBuf,
    args: Vec<String>,
    config_file: Option<PathBuf>,
    terminate_grace: Duration,
}

impl ConsoleLauncher {
    /// Launcher for the console configured in `config`, using its persistent config file
    pub fn from_config(config: &DriverConfig) -> Self {
        Self::with_config_file(config, &config.config_file)
    }

    /// Launcher bound to a specific console configuration file
    pub fn with_config_file(config: &DriverConfig, config_file: &Path) -> Self {
        let mut args = vec![
            "-n".to_string(),
            "-c".to_string(),
            config_file.display().to_string(),
        ];
        args.extend(config.extra_args.iter().cloned());

        Self {
            program: config.console_path.clone(),
            args,
            config_file: Some(config_file.to_path_buf()),
            terminate_grace: config.terminate_grace(),
        }
    }

    /// Launcher for an arbitrary program speaking the console protocol
    pub fn command(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            config_file: None,
            terminate_grace: DriverConfig::default().terminate_grace(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

#[async_trait]
impl ProcessLauncher for ConsoleLauncher {
    type Process = ConsoleProcess;

    async fn launch(&self) -> Result<ConsoleProcess> {
        if let Some(path) = &self.config_file {
            tokio::fs::File::open(path)
                .await
                .map_err(|e| Error::ArtifactUnreadable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
        }
        spawn_console_process(&self.program, &self.args, self.terminate_grace)
    }
}
