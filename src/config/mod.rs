//! YAML configuration loading, environment overlay, and precedence merging.
//!
//! Precedence, highest first: explicit API argument > CLI flag (both arrive
//! through [`Overrides`], the host merges them API-last) > `LOG_*` environment
//! variable > YAML config file > built-in default.
//!
//! Resolution never fails. A missing or malformed source degrades the affected
//! fields to their defaults and yields warning strings; `init` turns those into
//! Warning records so operators see degraded config without the application
//! seeing an error.

mod structs;

pub use structs::{ConfigFile, Overrides};

use crate::fmt::TimestampMode;
use crate::level::Level;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Rotation thresholds below this are clamped up — sub-kilobyte thresholds
/// would rotate on nearly every record.
const MIN_ROTATION_BYTES: u64 = 1024;

/// Resolved, immutable snapshot consumed by every component. Built once before
/// the core initializes; read-only for its lifetime, so all threads share it
/// without locking. Re-initialization builds a whole new snapshot and publishes
/// it atomically — readers see the old one or the new one, never a mix.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_level: Level,
    /// Ordered longest-prefix-first so `level_for` takes the most specific match.
    pub module_levels: Vec<(String, Level)>,
    pub log_dir: PathBuf,
    pub filename: String,
    /// Bytes; 0 disables rotation entirely.
    pub rotation_size: u64,
    pub backup_count: u32,
    pub colored_console: bool,
    pub colored_file: bool,
    pub console_enabled: bool,
    pub exit_on_critical: bool,
    pub queue_capacity: usize,
    pub lock_timeout: Duration,
    pub shutdown_grace: Duration,
    pub timestamp_mode: TimestampMode,
}

impl Default for Config {
    fn default() -> Self {
        resolve_file(ConfigFile::default(), &mut Vec::new())
    }
}

impl Config {
    /// Full resolution pipeline: file (if any), environment, then overrides.
    /// Returns the snapshot plus the warnings accumulated while degrading bad
    /// sources to defaults.
    #[must_use]
    pub fn resolve(overrides: &Overrides) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let mut raw = load_file(overrides, &mut warnings);
        apply_env(&mut raw, &mut warnings);

        let mut config = resolve_file(raw, &mut warnings);
        apply_overrides(&mut config, overrides);
        (config, warnings)
    }

    /// Effective level for a dotted logger name: the longest configured prefix
    /// wins, on segment boundaries only (`net` covers `net` and `net.http`,
    /// never `network`), falling back to the default level.
    #[must_use]
    pub fn level_for(&self, name: &str) -> Level {
        for (prefix, level) in &self.module_levels {
            if name == prefix
                || (name.len() > prefix.len()
                    && name.starts_with(prefix.as_str())
                    && name.as_bytes()[prefix.len()] == b'.')
            {
                return *level;
            }
        }
        self.default_level
    }

    /// Full path of the active log file.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.filename)
    }
}

/// Reads the YAML file named by the override or `LOG_CONFIG`. Absent path means
/// defaults; unreadable or unparsable file degrades to defaults with a warning.
fn load_file(overrides: &Overrides, warnings: &mut Vec<String>) -> ConfigFile {
    let path = overrides
        .config_path
        .clone()
        .or_else(|| std::env::var("LOG_CONFIG").ok().map(PathBuf::from));

    let Some(path) = path else {
        return ConfigFile::default();
    };

    match ConfigFile::load(&path) {
        Ok(file) => file,
        Err(e) => {
            warnings.push(format!(
                "config file {} ignored ({e}); using built-in defaults",
                path.display()
            ));
            ConfigFile::default()
        }
    }
}

/// Overlays the `LOG_*` environment family onto the raw file values.
fn apply_env(raw: &mut ConfigFile, warnings: &mut Vec<String>) {
    if let Ok(v) = std::env::var("LOG_LEVEL") {
        raw.default_level = v;
    }
    if let Ok(v) = std::env::var("LOG_DIR") {
        raw.log_dir = Some(v);
    }
    if let Ok(v) = std::env::var("LOG_FILENAME") {
        raw.log_filename = v;
    }
    if let Ok(v) = std::env::var("LOG_ROTATION_SIZE_MB") {
        match v.parse::<f64>() {
            Ok(mb) => raw.rotation_size_mb = mb,
            Err(_) => warnings.push(format!("LOG_ROTATION_SIZE_MB '{v}' is not a number; ignored")),
        }
    }
    if let Ok(v) = std::env::var("LOG_BACKUP_COUNT") {
        match v.parse::<u32>() {
            Ok(n) => raw.backup_count = n,
            Err(_) => warnings.push(format!("LOG_BACKUP_COUNT '{v}' is not a count; ignored")),
        }
    }
    for (var, field) in [
        ("LOG_COLORED_CONSOLE", &mut raw.colored_console),
        ("LOG_COLORED_FILE", &mut raw.colored_file),
        ("LOG_EXIT_ON_CRITICAL", &mut raw.exit_on_critical),
    ] {
        if let Ok(v) = std::env::var(var) {
            match parse_bool(&v) {
                Some(b) => *field = b,
                None => warnings.push(format!("{var} '{v}' is not a boolean; ignored")),
            }
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Converts the raw string-valued file into the typed snapshot, clamping and
/// degrading field by field.
fn resolve_file(raw: ConfigFile, warnings: &mut Vec<String>) -> Config {
    let default_level = parse_level(&raw.default_level, "default_level", warnings);

    let module_levels = resolve_module_levels(&raw.module_levels, warnings);

    let log_dir = raw.log_dir.map_or_else(default_log_dir, |dir| {
        PathBuf::from(shellexpand::tilde(&dir).into_owned())
    });

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rotation_size = if raw.rotation_size_mb <= 0.0 {
        0
    } else {
        ((raw.rotation_size_mb * 1024.0 * 1024.0) as u64).max(MIN_ROTATION_BYTES)
    };

    let timestamp_mode = match raw.timestamp.to_lowercase().as_str() {
        "human" => TimestampMode::Human,
        "unix" | "numeric" => TimestampMode::Unix,
        other => {
            warnings.push(format!(
                "unknown timestamp mode '{other}'; using human-readable"
            ));
            TimestampMode::Human
        }
    };

    Config {
        default_level,
        module_levels,
        log_dir,
        filename: raw.log_filename,
        rotation_size,
        backup_count: raw.backup_count,
        colored_console: raw.colored_console,
        colored_file: raw.colored_file,
        console_enabled: raw.console_enabled,
        exit_on_critical: raw.exit_on_critical,
        queue_capacity: raw.queue_capacity.max(1),
        lock_timeout: Duration::from_millis(raw.lock_timeout_ms),
        shutdown_grace: Duration::from_millis(raw.shutdown_grace_ms),
        timestamp_mode,
    }
}

fn parse_level(value: &str, field: &str, warnings: &mut Vec<String>) -> Level {
    value.parse().unwrap_or_else(|_| {
        warnings.push(format!("{field} '{value}' is not a level; using info"));
        Level::Info
    })
}

/// Sorts overrides longest-prefix-first so the most specific name wins lookups.
fn resolve_module_levels(
    raw: &HashMap<String, String>,
    warnings: &mut Vec<String>,
) -> Vec<(String, Level)> {
    let mut resolved: Vec<(String, Level)> = raw
        .iter()
        .filter_map(|(name, value)| match value.parse::<Level>() {
            Ok(level) => Some((name.clone(), level)),
            Err(_) => {
                warnings.push(format!(
                    "module_levels.{name} '{value}' is not a level; ignored"
                ));
                None
            }
        })
        .collect();
    resolved.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    resolved
}

/// CLI-parsed and API values win over everything resolved so far.
fn apply_overrides(config: &mut Config, overrides: &Overrides) {
    if let Some(level) = overrides.default_level {
        config.default_level = level;
    }
    if let Some(dir) = &overrides.log_dir {
        config.log_dir = expand_dir(dir);
    }
    if let Some(name) = &overrides.log_filename {
        config.filename = name.clone();
    }
    if let Some(colored) = overrides.colored_file {
        config.colored_file = colored;
    }
    if overrides.no_color {
        config.colored_console = false;
    }
    if let Some(exit) = overrides.exit_on_critical {
        config.exit_on_critical = exit;
    }
}

fn expand_dir(dir: &Path) -> PathBuf {
    dir.to_str().map_or_else(
        || dir.to_path_buf(),
        |s| PathBuf::from(shellexpand::tilde(s).into_owned()),
    )
}

/// Platform state directory when nothing is configured, mirroring where other
/// user services keep their logs; falls back to a relative `logs/` for
/// environments without a home directory.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "prismalog").map_or_else(
        || PathBuf::from("logs"),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("logs")
        },
    )
}
