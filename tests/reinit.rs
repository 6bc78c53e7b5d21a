//! Re-initialization: repeating `init` with the same configuration drains the
//! previous core first, produces the same on-disk layout, and never duplicates
//! open handles or leaks rotation locks.
//!
//! Sole test in this binary: it owns the process-global registry.

use prismalog::fmt::TimestampMode;
use prismalog::{Config, Level, State};
use std::time::Duration;
use tempfile::TempDir;

fn test_config(dir: &std::path::Path) -> Config {
    Config {
        default_level: Level::Debug,
        module_levels: Vec::new(),
        log_dir: dir.to_path_buf(),
        filename: "app.log".to_string(),
        rotation_size: 10 * 1024 * 1024,
        backup_count: 5,
        colored_console: false,
        colored_file: false,
        console_enabled: false,
        exit_on_critical: false,
        queue_capacity: 1024,
        lock_timeout: Duration::from_millis(500),
        shutdown_grace: Duration::from_secs(5),
        timestamp_mode: TimestampMode::Human,
    }
}

#[test]
fn reinit_with_same_config_is_idempotent() {
    let tmp_dir = TempDir::new().unwrap();
    let config = test_config(tmp_dir.path());

    prismalog::init(config.clone());
    let stale = prismalog::get_logger("app");
    stale.info("before re-init");

    // Second init drains the first core (flushing the record above) before
    // publishing the fresh snapshot.
    prismalog::init(config);
    assert_eq!(prismalog::state(), State::Running);

    // The stale handle still works without panicking; its core is stopped, so
    // the record is counted as dropped rather than delivered.
    stale.info("emitted into the drained core");

    let fresh = prismalog::get_logger("app");
    fresh.info("after re-init");

    prismalog::flush();
    prismalog::shutdown(Duration::from_secs(5));
    assert_eq!(prismalog::state(), State::Stopped);

    let content = std::fs::read_to_string(tmp_dir.path().join("app.log")).unwrap();
    assert!(content.contains("before re-init"));
    assert!(content.contains("after re-init"));
    assert!(!content.contains("emitted into the drained core"));

    // Same layout both times: the active file, at most its lock sentinel,
    // nothing else — no stray backups, no duplicate logs.
    let names: Vec<String> = std::fs::read_dir(tmp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"app.log".to_string()));
    for name in &names {
        assert!(
            name == "app.log" || name == "app.log.lock",
            "unexpected file: {name}"
        );
    }

    // The registry accepts a fresh lifecycle after a full stop.
    prismalog::init(test_config(tmp_dir.path()));
    prismalog::get_logger("app").info("third lifecycle");
    prismalog::flush();
    prismalog::shutdown(Duration::from_secs(5));
    let content = std::fs::read_to_string(tmp_dir.path().join("app.log")).unwrap();
    assert!(content.contains("third lifecycle"));
}
