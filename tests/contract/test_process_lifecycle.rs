//! Contract Tests for Console Process Lifecycle
//!
//! A console process only moves forward through NotStarted, Running and
//! Terminated, and a terminated process is never written to again.

use bconsole_driver::console::{spawn_console_process, ReadBounds};
use bconsole_driver::models::{ProcessInfo, ProcessState};
use bconsole_driver::{ConsoleLauncher, ProcessLauncher, SessionProcess};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_state_moves_forward_only() {
    let mut info = ProcessInfo::new("bconsole".to_string(), vec!["-n".to_string()]);
    assert_eq!(info.state, ProcessState::NotStarted);

    info.mark_started(Some(100));
    assert!(info.is_running());

    info.mark_terminated(Some(0));
    info.mark_started(Some(200));
    assert!(info.is_terminated());
    assert_eq!(info.pid, Some(100));
    assert_eq!(info.exit_code, Some(0));
}

#[tokio::test]
async fn test_terminate_is_idempotent() {
    let mut process = ConsoleLauncher::command("cat", vec![]).launch().await.unwrap();

    process.terminate().await.unwrap();
    let end = process.info().end_time;
    process.terminate().await.unwrap();

    assert_eq!(process.state(), ProcessState::Terminated);
    assert_eq!(process.info().end_time, end);
    assert!(process.info().execution_duration().is_some());
}

#[tokio::test]
async fn test_terminate_kills_after_grace() {
    let args = vec!["-c".to_string(), "trap '' TERM; sleep 30".to_string()];
    let mut process =
        spawn_console_process(Path::new("sh"), &args, Duration::from_millis(200)).unwrap();

    // give the shell time to install its trap
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = tokio::time::Instant::now();
    process.terminate().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!process.is_alive().await);
}

#[tokio::test]
async fn test_exited_process_is_lost() {
    let args = vec!["-c".to_string(), "exit 3".to_string()];
    let mut process =
        spawn_console_process(Path::new("sh"), &args, Duration::from_millis(200)).unwrap();

    tokio::time::sleep(Duration::from_millis(200)).await;
    let bounds = ReadBounds::new(Duration::from_millis(200), Duration::from_millis(50));
    let err = process.read_bounded(bounds).await.unwrap_err();

    assert!(err.is_process_lost());
    assert_eq!(process.info().exit_code, Some(3));
    assert!(process.write_command("version").await.is_err());
}

#[tokio::test]
async fn test_stderr_is_kept_separate() {
    let args = vec!["-c".to_string(), "read line; echo out; echo err >&2".to_string()];
    let mut process =
        spawn_console_process(Path::new("sh"), &args, Duration::from_millis(200)).unwrap();

    let (stdout, stderr) = process
        .communicate("version", Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(stdout, "out\n");
    assert_eq!(stderr, "err\n");
}

#[tokio::test]
async fn test_communicate_timeout_returns_partial_output() {
    let args = vec!["-c".to_string(), "echo partial; sleep 30".to_string()];
    let mut process =
        spawn_console_process(Path::new("sh"), &args, Duration::from_millis(100)).unwrap();

    let (stdout, _) = process
        .communicate("version", Duration::from_millis(500))
        .await
        .unwrap();
    assert_eq!(stdout, "partial\n");
    assert_eq!(process.state(), ProcessState::Terminated);
}
