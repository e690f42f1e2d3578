//! Console Streams
//!
//! Owns the three pipes of a console process and performs deadline-bounded
//! reads on them. Both output pipes are drained together so a console that
//! floods stderr cannot stall behind an unread stdout, or the reverse.

use std::io;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout};
use tokio::time::{sleep_until, Instant};

/// Size of a single pipe read
pub const READ_BUFFER_SIZE: usize = 8192;

/// Decoded text from one drain pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Drained {
    pub stdout: String,
    pub stderr: String,
    /// Deadline passed without any output at all
    pub timed_out: bool,
}

/// The pipes of a console process
pub struct ConsoleStreams {
    stdin: Option<ChildStdin>,
    stdout: ChildStdout,
    stderr: ChildStderr,
    stdout_eof: bool,
    stderr_eof: bool,
    /// Trailing bytes of an incomplete UTF-8 sequence, kept for the next read
    stdout_pending: Vec<u8>,
    stderr_pending: Vec<u8>,
    stats: StreamStats,
}

impl ConsoleStreams {
    pub fn new(stdin: ChildStdin, stdout: ChildStdout, stderr: ChildStderr) -> Self {
        Self {
            stdin: Some(stdin),
            stdout,
            stderr,
            stdout_eof: false,
            stderr_eof: false,
            stdout_pending: Vec::new(),
            stderr_pending: Vec::new(),
            stats: StreamStats::default(),
        }
    }

    /// Write `line` and the protocol's line terminator
    pub async fn write_line(&mut self, line: &str) -> io::Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "console input already closed")
        })?;

        let mut data = Vec::with_capacity(line.len() + 1);
        data.extend_from_slice(line.as_bytes());
        data.push(b'\n');

        match stdin.write_all(&data).await {
            Ok(()) => {}
            Err(e) => {
                self.stats.write_errors += 1;
                return Err(e);
            }
        }
        stdin.flush().await?;

        self.stats.bytes_written += data.len() as u64;
        self.stats.write_operations += 1;
        Ok(())
    }

    /// Close the console's input so it sees end of file
    pub fn close_input(&mut self) {
        self.stdin.take();
    }

    /// Both output pipes have reached end of file
    pub fn is_closed(&self) -> bool {
        self.stdout_eof && self.stderr_eof
    }

    /// Read from both output pipes until `deadline`
    ///
    /// With `quiet` set, the pass also ends once output has started and the
    /// console stays silent for that long. Ends early when both pipes close.
    pub async fn drain(&mut self, deadline: Instant, quiet: Option<Duration>) -> io::Result<Drained> {
        let mut out = std::mem::take(&mut self.stdout_pending);
        let mut err = std::mem::take(&mut self.stderr_pending);
        let mut out_buf = vec![0u8; READ_BUFFER_SIZE];
        let mut err_buf = vec![0u8; READ_BUFFER_SIZE];
        let mut received = false;
        let mut timed_out = false;

        self.stats.read_operations += 1;

        while !self.is_closed() {
            let wake = match quiet {
                Some(quiet) if received => (Instant::now() + quiet).min(deadline),
                _ => deadline,
            };

            tokio::select! {
                read = self.stdout.read(&mut out_buf), if !self.stdout_eof => {
                    match read? {
                        0 => self.stdout_eof = true,
                        n => {
                            out.extend_from_slice(&out_buf[..n]);
                            self.stats.bytes_read += n as u64;
                            received = true;
                        }
                    }
                }
                read = self.stderr.read(&mut err_buf), if !self.stderr_eof => {
                    match read? {
                        0 => self.stderr_eof = true,
                        n => {
                            err.extend_from_slice(&err_buf[..n]);
                            self.stats.bytes_read += n as u64;
                            received = true;
                        }
                    }
                }
                _ = sleep_until(wake) => {
                    if !received {
                        self.stats.read_timeouts += 1;
                        timed_out = true;
                    }
                    break;
                }
            }
        }

        let stdout = decode_available(&mut out, &mut self.stdout_pending, self.stdout_eof);
        let stderr = decode_available(&mut err, &mut self.stderr_pending, self.stderr_eof);

        Ok(Drained {
            stdout,
            stderr,
            timed_out,
        })
    }

    /// Statistics for this session's pipes
    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}

/// Decode `bytes`, holding back an incomplete trailing UTF-8 sequence
///
/// At end of file nothing is held back; invalid bytes become U+FFFD.
fn decode_available(bytes: &mut Vec<u8>, pending: &mut Vec<u8>, eof: bool) -> String {
    if !eof {
        let invalid = std::str::from_utf8(bytes).err();
        if let Some(e) = invalid {
            if e.error_len().is_none() {
                *pending = bytes.split_off(e.valid_up_to());
            }
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Stream statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct StreamStats {
    /// Total bytes read from stdout and stderr
    pub bytes_read: u64,
    /// Total bytes written to stdin
    pub bytes_written: u64,
    /// Number of drain passes
    pub read_operations: u64,
    /// Number of commands written
    pub write_operations: u64,
    /// Drain passes that ended without any output
    pub read_timeouts: u64,
    /// Number of failed writes
    pub write_errors: u64,
}

impl StreamStats {
    /// Average bytes per drain pass
    pub fn read_throughput(&self) -> f64 {
        if self.read_operations == 0 {
            0.0
        } else {
            self.bytes_read as f64 / self.read_operations as f64
        }
    }
}
