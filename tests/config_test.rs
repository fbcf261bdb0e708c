//! Configuration loading tests

use std::fs;

use assert_matches::assert_matches;
use serial_test::serial;
use tempfile::TempDir;

use minbar::config::{LogFormat, Settings};
use minbar::models::Direction;
use minbar::MinbarError;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[locales]
default_locale = "en"

[[locales.supported]]
tag = "en"
direction = "ltr"

[[locales.supported]]
tag = "ur"
direction = "rtl"

[cache]
enabled = true
ttl_seconds = 60

[logging]
format = "json"
"#,
    );

    let settings = Settings::from_file(&path).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.locales.default_locale, "en");
    assert_eq!(settings.locales.supported.len(), 2);
    assert_eq!(settings.locales.supported[1].direction, Direction::Rtl);
    assert!(settings.cache.enabled);
    assert_eq!(settings.logging.format, LogFormat::Json);
    // Untouched sections keep their defaults
    assert!(settings.routing.excluded_prefixes.contains(&"/api/".to_string()));
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Settings::from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[server]\nport = 8080\n");

    std::env::set_var("MINBAR_SERVER__PORT", "9090");
    std::env::set_var("MINBAR_ROUTING__NEGOTIATE_FROM_HEADER", "true");
    let result = Settings::from_file(&path);
    std::env::remove_var("MINBAR_SERVER__PORT");
    std::env::remove_var("MINBAR_ROUTING__NEGOTIATE_FROM_HEADER");

    let settings = result.unwrap();
    assert_eq!(settings.server.port, 9090);
    assert!(settings.routing.negotiate_from_header);
}

#[test]
#[serial]
fn test_invalid_file_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[locales]
default_locale = "fr"

[[locales.supported]]
tag = "en"
direction = "ltr"
"#,
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_matches!(settings.validate(), Err(MinbarError::Config(_)));
}
