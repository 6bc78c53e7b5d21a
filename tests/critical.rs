//! Critical handling with exit disabled: the record is still written and the
//! process carries on. The exit path itself would terminate the test harness,
//! so what is covered here is the disabled switch and the observer's
//! below-critical early return.
//!
//! The registry test is the sole registry user in this binary; the handler
//! unit tests touch no global state.

use prismalog::fmt::TimestampMode;
use prismalog::output::Sink;
use prismalog::{Config, CriticalHandler, Level, Record};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn critical_without_exit_writes_and_continues() {
    let tmp_dir = TempDir::new().unwrap();
    prismalog::init(Config {
        default_level: Level::Debug,
        module_levels: Vec::new(),
        log_dir: tmp_dir.path().to_path_buf(),
        filename: "app.log".to_string(),
        rotation_size: 0,
        backup_count: 0,
        colored_console: false,
        colored_file: false,
        console_enabled: false,
        exit_on_critical: false,
        queue_capacity: 1024,
        lock_timeout: Duration::from_millis(500),
        shutdown_grace: Duration::from_secs(5),
        timestamp_mode: TimestampMode::Human,
    });

    let log = prismalog::get_logger("app.core");
    log.critical("unrecoverable but tolerated");
    log.info("still alive afterwards");

    prismalog::flush();
    prismalog::shutdown(Duration::from_secs(5));

    let content = std::fs::read_to_string(tmp_dir.path().join("app.log")).unwrap();
    assert!(content.contains("[CRITICAL] "));
    assert!(content.contains("unrecoverable but tolerated"));
    assert!(content.contains("still alive afterwards"));
}

#[test]
fn disabled_handler_is_a_no_op_for_critical_records() {
    let handler = CriticalHandler::new(false);
    assert!(!handler.exit_enabled());

    let record = Record::new(Level::Critical, "app", "boom");
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    handler.observe(&record, &mut sinks);
    // Reaching this line is the assertion.
}

#[test]
fn enabled_handler_ignores_records_below_critical() {
    let handler = CriticalHandler::new(true);
    assert!(handler.exit_enabled());

    let record = Record::new(Level::Error, "app", "bad but survivable");
    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    handler.observe(&record, &mut sinks);
}
