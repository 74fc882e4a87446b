//! Configuration tests
//!
//! Tests for config paths, the YAML config file and file-backed settings.

use std::fs;

use recase::config_paths;
use recase::settings::{FileSettings, SettingsError, SettingsProvider};
use recase::settings_watcher::SettingsWatcher;
use recase::RecaseConfig;
use tempfile::tempdir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("recase"));
    }
}

#[test]
fn test_config_file_is_yaml_in_config_dir() {
    if let (Some(dir), Some(file)) = (config_paths::config_dir(), config_paths::config_file()) {
        assert_eq!(file.parent(), Some(dir.as_path()));
        assert_eq!(file.extension().and_then(|e| e.to_str()), Some("yaml"));
    }
}

#[test]
fn test_logs_dir_under_config_dir() {
    if let (Some(dir), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&dir));
        assert!(logs.ends_with("logs"));
    }
}

// ========================================================================
// Config File Tests
// ========================================================================

#[test]
fn test_saved_config_is_readable_yaml() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");

    let config = RecaseConfig {
        ignore_list: "GmbH, AG, S.A.".to_string(),
    };
    config.save_to(&path).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("ignore_list"));
    assert_eq!(RecaseConfig::read(&path), Ok(config));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "ignore_list: Inc\nfuture_option: true\n").unwrap();

    assert_eq!(RecaseConfig::load_from(&path).ignore_list, "Inc");
}

// ========================================================================
// File Settings Tests
// ========================================================================

#[test]
fn test_file_settings_follow_edits() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    let settings = FileSettings::new(path.clone());

    assert_eq!(settings.ignore_list(), Ok("LLC, Ltd., LP".to_string()));

    fs::write(&path, "ignore_list: Inc\n").unwrap();
    assert_eq!(settings.ignore_list(), Ok("Inc".to_string()));

    fs::write(&path, "ignore_list: \"\"\n").unwrap();
    assert_eq!(settings.ignore_list(), Ok(String::new()));
}

#[test]
fn test_stored_ignore_list_reaches_file_settings() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("recase").join("config.yaml");
    let settings = FileSettings::new(path.clone());

    RecaseConfig::store_ignore_list(&path, "  GmbH, AG  ").unwrap();
    assert_eq!(settings.ignore_list(), Ok("GmbH, AG".to_string()));
    assert_eq!(settings.stored_value(), Ok(Some("GmbH, AG".to_string())));

    RecaseConfig::store_ignore_list(&path, "").unwrap();
    assert_eq!(settings.ignore_list(), Ok(String::new()));
}

#[test]
fn test_unreadable_settings_report_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, "ignore_list: {nested: map}\n").unwrap();

    assert!(matches!(
        FileSettings::new(path).ignore_list(),
        Err(SettingsError::Malformed(_))
    ));
}

#[test]
fn test_watcher_reports_changes_between_checks() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yaml");
    let Ok(mut watcher) = SettingsWatcher::new(FileSettings::new(path.clone())) else {
        return; // Skip if watcher can't be created
    };
    assert_eq!(watcher.path(), path.as_path());

    fs::write(&path, "ignore_list: Inc\n").unwrap();
    let change = watcher.check_for_change().expect("value changed");
    assert_eq!(change.old, None);
    assert_eq!(change.new.as_deref(), Some("Inc"));
}
