//! Integration tests for configuration resolution
//!
//! Covers:
//! - Environment variable overrides (`GLUE_*`)
//! - CLI > environment > file > default priority
//! - Explicit config file loading and error reporting
//!
//! Tests touching process environment are marked #[serial] so they never
//! race each other.

use glue_common::config::{Config, ConfigOverrides, Environment, DEFAULT_PORT};
use glue_common::content::LoaderMode;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;

const GLUE_VARS: &[&str] = &[
    "GLUE_PORT",
    "GLUE_DATABASE",
    "GLUE_BACKEND_URL",
    "GLUE_OFFLINE",
    "GLUE_ENV",
    "GLUE_ADMIN_TOKEN",
    "GLUE_LOG_LEVEL",
];

fn clear_env() {
    for var in GLUE_VARS {
        env::remove_var(var);
    }
}

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn test_env_overrides_read() {
    clear_env();
    env::set_var("GLUE_PORT", "5999");
    env::set_var("GLUE_OFFLINE", "1");
    env::set_var("GLUE_ENV", "production");
    env::set_var("GLUE_ADMIN_TOKEN", "hunter2");

    let overrides = ConfigOverrides::from_env().unwrap();
    assert_eq!(overrides.port, Some(5999));
    assert_eq!(overrides.offline, Some(true));
    assert_eq!(overrides.environment, Some(Environment::Production));
    assert_eq!(overrides.admin_token.as_deref(), Some("hunter2"));

    clear_env();
}

#[test]
#[serial]
fn test_env_invalid_port_is_error() {
    clear_env();
    env::set_var("GLUE_PORT", "not-a-port");

    assert!(ConfigOverrides::from_env().is_err());

    clear_env();
}

#[test]
#[serial]
fn test_empty_env_values_ignored() {
    clear_env();
    env::set_var("GLUE_BACKEND_URL", "");

    let overrides = ConfigOverrides::from_env().unwrap();
    assert!(overrides.backend_url.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_cli_beats_env_beats_file() {
    clear_env();
    env::set_var("GLUE_PORT", "6001");
    env::set_var("GLUE_BACKEND_URL", "http://env.backend");

    let file = write_config(
        r#"
        port = 6002
        backend_url = "http://file.backend"
        database_path = "/tmp/glue-file.db"
        "#,
    );

    let cli = ConfigOverrides {
        config_path: Some(file.path().to_path_buf()),
        port: Some(6000),
        ..Default::default()
    };
    let config = Config::resolve(cli.or(ConfigOverrides::from_env().unwrap())).unwrap();

    assert_eq!(config.port, 6000);
    assert_eq!(config.backend_url, "http://env.backend");
    assert_eq!(config.database_path, PathBuf::from("/tmp/glue-file.db"));

    clear_env();
}

#[test]
fn test_explicit_missing_config_file_is_error() {
    let overrides = ConfigOverrides {
        config_path: Some(PathBuf::from("/nonexistent/glue/config.toml")),
        ..Default::default()
    };
    assert!(Config::resolve(overrides).is_err());
}

#[test]
fn test_malformed_config_file_is_error() {
    let file = write_config("port = \"eighty\"");
    let overrides = ConfigOverrides {
        config_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    assert!(Config::resolve(overrides).is_err());
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
        port = 8080
        offline = true
        environment = "production"
        admin_token = "from-file"
        fetch_timeout_ms = 250

        [logging]
        level = "warn"
        "#,
    );
    let overrides = ConfigOverrides {
        config_path: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let config = Config::resolve(overrides).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.mode, LoaderMode::Offline);
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.admin_token.as_deref(), Some("from-file"));
    assert_eq!(config.fetch_timeout.as_millis(), 250);
    assert_eq!(config.log_level, "warn");
    assert_ne!(config.port, DEFAULT_PORT);
}
