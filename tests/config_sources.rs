//! Tests for configuration resolution — files, overrides, precedence, and the
//! degrade-to-defaults policy. Environment overlay lives in its own binary so
//! `LOG_*` mutations never race other tests in this process.

use prismalog::{Config, Level, Overrides, TimestampMode};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn resolve_file(yaml: &str) -> (Config, Vec<String>) {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("log.yaml");
    fs::write(&path, yaml).unwrap();
    Config::resolve(&Overrides {
        config_path: Some(path),
        ..Overrides::default()
    })
}

#[test]
fn builtin_defaults() {
    let config = Config::default();
    assert_eq!(config.default_level, Level::Info);
    assert_eq!(config.filename, "app.log");
    assert_eq!(config.rotation_size, 10 * 1024 * 1024);
    assert_eq!(config.backup_count, 5);
    assert!(config.colored_console);
    assert!(!config.colored_file);
    assert!(config.console_enabled);
    assert!(!config.exit_on_critical);
    assert_eq!(config.timestamp_mode, TimestampMode::Human);
}

#[test]
fn yaml_file_overrides_defaults() {
    let (config, warnings) = resolve_file(
        r"
default_level: debug
log_filename: svc.log
rotation_size_mb: 1
backup_count: 2
colored_file: true
exit_on_critical: true
timestamp: unix
module_levels:
  net: warning
",
    );
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.default_level, Level::Debug);
    assert_eq!(config.filename, "svc.log");
    assert_eq!(config.rotation_size, 1024 * 1024);
    assert_eq!(config.backup_count, 2);
    assert!(config.colored_file);
    assert!(config.exit_on_critical);
    assert_eq!(config.timestamp_mode, TimestampMode::Unix);
    assert_eq!(config.level_for("net.http"), Level::Warning);
}

#[test]
fn empty_file_is_a_working_config() {
    let (config, warnings) = resolve_file("");
    assert!(warnings.is_empty());
    assert_eq!(config.default_level, Level::Info);
}

#[test]
fn malformed_file_degrades_to_defaults_with_warning() {
    let (config, warnings) = resolve_file("default_level: [not, a, level");
    assert_eq!(config.default_level, Level::Info);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("parse error"));
}

#[test]
fn missing_file_degrades_to_defaults_with_warning() {
    let (config, warnings) = Config::resolve(&Overrides {
        config_path: Some(PathBuf::from("/nonexistent/prismalog.yaml")),
        ..Overrides::default()
    });
    assert_eq!(config.default_level, Level::Info);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("I/O error"));
}

#[test]
fn strict_loader_surfaces_hard_errors() {
    use prismalog::config::ConfigFile;

    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("log.yaml");
    fs::write(&path, "backup_count: many\n").unwrap();

    assert!(matches!(
        ConfigFile::load(&path),
        Err(prismalog::Error::ConfigParse(_))
    ));
    assert!(matches!(
        ConfigFile::load(&tmp_dir.path().join("absent.yaml")),
        Err(prismalog::Error::Io(_))
    ));
}

#[test]
fn bad_level_string_degrades_that_field_only() {
    let (config, warnings) = resolve_file(
        r"
default_level: loud
backup_count: 3
",
    );
    assert_eq!(config.default_level, Level::Info);
    assert_eq!(config.backup_count, 3);
    assert_eq!(warnings.len(), 1);
}

#[test]
fn overrides_beat_the_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("log.yaml");
    fs::write(&path, "default_level: debug\ncolored_console: true\n").unwrap();

    let (config, _) = Config::resolve(&Overrides {
        config_path: Some(path),
        default_level: Some(Level::Error),
        log_filename: Some("cli.log".to_string()),
        no_color: true,
        ..Overrides::default()
    });
    assert_eq!(config.default_level, Level::Error);
    assert_eq!(config.filename, "cli.log");
    assert!(!config.colored_console);
}

#[test]
fn rotation_threshold_clamps_to_a_kilobyte() {
    let (config, _) = resolve_file("rotation_size_mb: 0.0001\n");
    assert_eq!(config.rotation_size, 1024);
}

#[test]
fn rotation_zero_disables() {
    let (config, _) = resolve_file("rotation_size_mb: 0\n");
    assert_eq!(config.rotation_size, 0);
}

#[test]
fn longest_prefix_wins_on_segment_boundaries() {
    let (config, _) = resolve_file(
        r"
default_level: warning
module_levels:
  net: debug
  net.http: error
",
    );
    assert_eq!(config.level_for("net.http"), Level::Error);
    assert_eq!(config.level_for("net.http.client"), Level::Error);
    assert_eq!(config.level_for("net.tcp"), Level::Debug);
    assert_eq!(config.level_for("net"), Level::Debug);
    // Prefixes match whole segments, not raw characters.
    assert_eq!(config.level_for("network"), Level::Warning);
    assert_eq!(config.level_for("app"), Level::Warning);
}

#[test]
fn log_path_joins_dir_and_filename() {
    let (config, _) = resolve_file("log_dir: /tmp/svc\nlog_filename: a.log\n");
    assert_eq!(config.log_path(), PathBuf::from("/tmp/svc/a.log"));
}
