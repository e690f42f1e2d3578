//! Contract Tests for the Synchronous Console Operations
//!
//! Each operation writes exactly one command line and folds the console's
//! reply into a boolean, a record list or an estimate. Daemon refusals are
//! never errors; only startup failures are.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use bconsole_driver::{BConsole, DeleteTarget, Error, Estimate, LabelRequest};
use test_utils::{fast_config, ScriptedLauncher};

fn console(stdout: &str, stderr: &str) -> BConsole<ScriptedLauncher> {
    BConsole::with_launcher(fast_config(), ScriptedLauncher::replying(stdout, stderr))
}

#[tokio::test]
async fn test_is_running() {
    assert!(console("Version", "").is_running().await.unwrap());
    assert!(console("1000 OK: bacula-dir Version: 5.2.6 (21 February 2012)", "")
        .is_running()
        .await
        .unwrap());

    assert!(!console("error", "error").is_running().await.unwrap());
    assert!(!console("", "").is_running().await.unwrap());
    assert!(!console("Version error", "").is_running().await.unwrap());
    assert!(!console("", "Version").is_running().await.unwrap());
}

#[tokio::test]
async fn test_is_running_sends_version() {
    let bconsole = console("Version", "");
    bconsole.is_running().await.unwrap();
    assert_eq!(bconsole.launcher().written(), vec!["version"]);
}

#[tokio::test]
async fn test_is_running_is_repeatable() {
    // each check runs its own console, so no state leaks between calls
    let bconsole = console("Version", "");
    let first = bconsole.is_running().await.unwrap();
    let second = bconsole.is_running().await.unwrap();
    assert!(first);
    assert_eq!(first, second);
    assert_eq!(bconsole.launcher().launch_count(), 2);
    assert_eq!(bconsole.launcher().written(), vec!["version", "version"]);

    let bconsole = console("error", "error");
    let first = bconsole.is_running().await.unwrap();
    let second = bconsole.is_running().await.unwrap();
    assert!(!first);
    assert_eq!(first, second);
    assert_eq!(bconsole.launcher().launch_count(), 2);
}

#[tokio::test]
async fn test_get_upcoming_jobs() {
    let status = "\
Scheduled Jobs:
Level          Type     Pri  Scheduled          Name               Volume
===================================================================================
Incremental    Backup    10  18-Mar-12 23:05    BackupClient1      TestVolume001
Full           Backup    11  18-Mar-12 23:10    BackupCatalog      TestVolume001
====
";
    let bconsole = console(status, "");
    let jobs = bconsole.get_upcoming_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].level, "Incremental");
    assert_eq!(jobs[0].job_type, "Backup");
    assert_eq!(jobs[0].priority, "10");
    assert_eq!(jobs[0].date, "18-Mar-12");
    assert_eq!(jobs[0].time, "23:05");
    assert_eq!(jobs[0].name, "BackupClient1");
    assert_eq!(jobs[0].volume, "TestVolume001");
    assert_eq!(jobs[1].name, "BackupCatalog");
    assert_eq!(bconsole.launcher().written(), vec!["status dir"]);

    assert!(console("error", "error").get_upcoming_jobs().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_disabled_jobs() {
    let bconsole = console("Disabled Jobs:\n    Backupclient1\n", "");
    let jobs = bconsole.get_disabled_jobs().await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].name, "Backupclient1");
    assert_eq!(bconsole.launcher().written(), vec!["show disabled"]);
}

#[tokio::test]
async fn test_mount_storage() {
    let bconsole = console("3001 Device \"FileStorage\" (/tmp) is mounted with Volume \"Vol1\"", "");
    assert!(bconsole.mount_storage("File", "0").await.unwrap());
    assert_eq!(bconsole.launcher().written(), vec!["mount storage=File drive=0"]);

    assert!(!console("error", "error").mount_storage("File", "0").await.unwrap());
}

#[tokio::test]
async fn test_unmount_storage() {
    let bconsole = console("3002 Device \"FileStorage\" (/tmp) unmounted.", "");
    assert!(bconsole.unmount_storage("File").await.unwrap());
    assert_eq!(bconsole.launcher().written(), vec!["unmount storage=File"]);

    assert!(!console("error", "error").unmount_storage("File").await.unwrap());
}

#[tokio::test]
async fn test_delete() {
    let bconsole = console("Volume \"Vol1\" deleted from catalog.", "");
    assert!(bconsole
        .delete(DeleteTarget::Volume("Vol1".to_string()))
        .await
        .unwrap());

    let bconsole = console("Jobid 12 deleted from catalog.", "");
    assert!(bconsole.delete(DeleteTarget::JobId(12)).await.unwrap());
    assert_eq!(bconsole.launcher().written(), vec!["delete jobid=12"]);

    assert!(!console("error", "error")
        .delete(DeleteTarget::JobId(12))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_create_label() {
    let created = "3000 OK label. VolBytes=64512 Volume=\"Vol2\" Device=\"FileStorage\"\nCatalog record for Volume \"Vol2\", Slot 0 successfully created.";

    let bconsole = console(created, "");
    assert!(bconsole
        .create_label(LabelRequest::named("Default", "Vol2"))
        .await
        .unwrap());

    let bconsole = console(created, "");
    assert!(bconsole
        .create_label(LabelRequest::named("Default", "Vol2").on_storage("File"))
        .await
        .unwrap());
    assert_eq!(
        bconsole.launcher().written(),
        vec!["label volume=Vol2 pool=Default storage=File yes"]
    );

    let bconsole = console(created, "");
    assert!(bconsole
        .create_label(LabelRequest::barcodes("Default"))
        .await
        .unwrap());

    assert!(!console("error", "error")
        .create_label(LabelRequest::barcodes("Default"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_enable_disable_job() {
    assert!(console("Job \"BackupClient1\" disabled", "")
        .disable_job("BackupClient1")
        .await
        .unwrap());
    assert!(console("Job \"BackupClient1\" enabled", "")
        .enable_job("BackupClient1")
        .await
        .unwrap());

    assert!(!console("error", "error").disable_job("BackupClient1").await.unwrap());
    assert!(!console("error", "error").enable_job("BackupClient1").await.unwrap());
}

#[tokio::test]
async fn test_estimate_job() {
    let bconsole = console("2000 OK estimate files=1000 bytes=10,000,000", "");
    let estimate = bconsole.estimate_job("BackupClient1").await.unwrap();
    assert_eq!(estimate.as_tuple(), (1000, 10_000_000));
    assert_eq!(bconsole.launcher().written(), vec!["estimate job=BackupClient1"]);

    let estimate = console("error", "error").estimate_job("BackupClient1").await.unwrap();
    assert_eq!(estimate, Estimate::UNKNOWN);
}

#[tokio::test]
async fn test_invalid_argument_starts_nothing() {
    let bconsole = console("", "");
    let err = bconsole.disable_job("Backup\nquit").await.unwrap_err();

    assert!(matches!(err, Error::InvalidArgument { .. }));
    assert_eq!(bconsole.launcher().launch_count(), 0);
}

#[tokio::test]
async fn test_missing_console_is_startup_error() {
    let bconsole = BConsole::with_launcher(fast_config(), ScriptedLauncher::missing());

    assert!(bconsole.is_running().await.unwrap_err().is_startup_error());
    assert!(bconsole
        .mount_storage("File", "0")
        .await
        .unwrap_err()
        .is_startup_error());
}
