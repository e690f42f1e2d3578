//! Unit Tests for Console Command Templating

use bconsole_driver::console::commands::{
    is_session_terminating, quote_value, ConsoleCommand, DeleteTarget, LabelRequest,
};
use bconsole_driver::Error;

#[test]
fn test_every_operation_renders_one_line() {
    let cases = [
        (ConsoleCommand::Version, "version"),
        (ConsoleCommand::StatusDirector, "status dir"),
        (ConsoleCommand::ShowDisabled, "show disabled"),
        (
            ConsoleCommand::Mount {
                storage: "File".to_string(),
                drive: "0".to_string(),
            },
            "mount storage=File drive=0",
        ),
        (
            ConsoleCommand::Unmount {
                storage: "File".to_string(),
            },
            "unmount storage=File",
        ),
        (
            ConsoleCommand::Delete(DeleteTarget::Volume("Vol-0007".to_string())),
            "delete volume=Vol-0007 yes",
        ),
        (
            ConsoleCommand::Delete(DeleteTarget::JobId(42)),
            "delete jobid=42",
        ),
        (
            ConsoleCommand::Label(LabelRequest::barcodes("Scratch").on_storage("Autochanger")),
            "label barcodes pool=Scratch storage=Autochanger yes",
        ),
        (
            ConsoleCommand::DisableJob("BackupClient1".to_string()),
            "disable job=BackupClient1",
        ),
        (
            ConsoleCommand::EnableJob("BackupClient1".to_string()),
            "enable job=BackupClient1",
        ),
        (
            ConsoleCommand::Estimate("BackupClient1".to_string()),
            "estimate job=BackupClient1",
        ),
    ];

    for (command, expected) in cases {
        let line = command.render().unwrap();
        assert_eq!(line, expected);
        assert!(!line.contains('\n'));
    }
}

#[test]
fn test_quoting() {
    assert_eq!(quote_value("pool", "Default").unwrap(), "Default");
    assert_eq!(quote_value("pool", "Off Site").unwrap(), "\"Off Site\"");

    let label = ConsoleCommand::Label(LabelRequest::named("Off Site", "Vol 1"));
    assert_eq!(
        label.render().unwrap(),
        "label volume=\"Vol 1\" pool=\"Off Site\" yes"
    );
}

#[test]
fn test_rejections_name_the_field() {
    let err = ConsoleCommand::Mount {
        storage: "File".to_string(),
        drive: "0\r".to_string(),
    }
    .render()
    .unwrap_err();

    match err {
        Error::InvalidArgument { field, .. } => assert_eq!(field, "drive"),
        other => panic!("unexpected error: {}", other),
    }

    assert!(quote_value("job", "tab\there").is_err());
    assert!(quote_value("job", "").is_err());
}

#[test]
fn test_terminating_commands() {
    for command in ["quit", "QUIT", "exit", " Exit\t"] {
        assert!(is_session_terminating(command), "{:?}", command);
    }
    for command in ["quit now", "status", "exit;", ""] {
        assert!(!is_session_terminating(command), "{:?}", command);
    }
}
