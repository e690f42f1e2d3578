//! Integration Tests for Driver Configuration Loading

use bconsole_driver::config::loader::{ConfigLoader, LoadOptions, CONFIG_ENV_VAR};
use bconsole_driver::config::DriverConfig;
use bconsole_driver::Error;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_partial_toml_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("driver.toml");
    fs::write(
        &path,
        r#"
console_path = "/opt/bacula/bin/bconsole"
poll_timeout_ms = 2500
extra_args = ["-t"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();
    assert_eq!(config.console_path, PathBuf::from("/opt/bacula/bin/bconsole"));
    assert_eq!(config.poll_timeout(), Duration::from_millis(2500));
    assert_eq!(config.extra_args, vec!["-t"]);
    assert_eq!(config.poll_quiet(), Duration::from_millis(100));
    assert_eq!(config.command_timeout(), Duration::from_secs(30));
    assert_eq!(config.temp_dir, None);
}

#[test]
fn test_json_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("driver.json");
    fs::write(&path, r#"{"temp_dir": "/var/tmp", "terminate_grace_ms": 50}"#).unwrap();

    let config = ConfigLoader::load_from_path(&path).unwrap();
    assert_eq!(config.temp_dir, Some(PathBuf::from("/var/tmp")));
    assert_eq!(config.terminate_grace(), Duration::from_millis(50));
}

#[test]
fn test_invalid_values_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("driver.toml");
    fs::write(&path, "poll_timeout_ms = 100\npoll_quiet_ms = 500\n").unwrap();

    let err = ConfigLoader::load_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigValidationFailed { .. }));
}

#[test]
fn test_malformed_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("driver.toml");
    fs::write(&path, "poll_timeout_ms = \"soon\"").unwrap();

    let err = ConfigLoader::load_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParseFailed { .. }));
}

#[test]
fn test_search_path_and_env_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    // nothing on the search path
    let mut loader = ConfigLoader::new();
    loader.set_search_path(temp_dir.path().join("bconsole-driver"));
    let options = LoadOptions {
        create_default: false,
        validate: true,
    };
    std::env::remove_var(CONFIG_ENV_VAR);
    assert!(matches!(
        loader.load_with_options(options.clone()),
        Err(Error::ConfigNotFound)
    ));

    // a file on the search path
    fs::write(temp_dir.path().join("bconsole-driver.toml"), "command_timeout_secs = 5\n").unwrap();
    let config = loader.load_with_options(options.clone()).unwrap();
    assert_eq!(config.command_timeout(), Duration::from_secs(5));
    assert_eq!(
        loader.current_path(),
        Some(temp_dir.path().join("bconsole-driver.toml").as_path())
    );

    // the environment variable wins
    let explicit = temp_dir.path().join("explicit.json");
    fs::write(&explicit, r#"{"command_timeout_secs": 9}"#).unwrap();
    std::env::set_var(CONFIG_ENV_VAR, &explicit);
    let config = loader.load_with_options(options);
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().command_timeout(), Duration::from_secs(9));
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("driver.toml");
    let config = DriverConfig {
        extra_args: vec!["-D".to_string(), "director".to_string()],
        poll_quiet_ms: 250,
        ..DriverConfig::default()
    };

    let loader = ConfigLoader::new();
    loader.save_to_path(&config, &path).unwrap();
    assert_eq!(ConfigLoader::load_from_path(&path).unwrap(), config);
}
