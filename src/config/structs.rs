//! Configuration struct definitions.

use crate::error::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Raw YAML schema. A completely empty config file must still produce a working
/// logger — `#[serde(default)]` on every field ensures zero-config works out of
/// the box. Level strings stay unparsed here so a single typo degrades that one
/// field instead of rejecting the whole file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Minimum level for loggers without a module override.
    pub default_level: String,
    /// Per-module level overrides, matched by longest dotted prefix.
    pub module_levels: HashMap<String, String>,
    /// Directory for the active log file and its backups.
    pub log_dir: Option<String>,
    /// Base filename of the active log file.
    pub log_filename: String,
    /// Rotation threshold in megabytes; 0 disables rotation.
    pub rotation_size_mb: f64,
    /// Number of rotated backups to keep.
    pub backup_count: u32,
    /// ANSI color on the console sink.
    pub colored_console: bool,
    /// ANSI color in the log file — off by default, escape bytes pollute grep.
    pub colored_file: bool,
    /// Mirror records to the console at all.
    pub console_enabled: bool,
    /// Terminate the process after a critical record is flushed.
    pub exit_on_critical: bool,
    /// Bounded delivery queue capacity; overflow drops rather than blocks.
    pub queue_capacity: usize,
    /// Bounded wait for the cross-process rotation lock.
    pub lock_timeout_ms: u64,
    /// Bounded wait for shutdown draining before remaining records are dropped.
    pub shutdown_grace_ms: u64,
    /// Timestamp rendering: "human" or "unix".
    pub timestamp: String,
}

impl ConfigFile {
    /// Strict loader for hosts that want a hard failure on a bad file. The
    /// resolution pipeline wraps this and degrades to defaults instead.
    ///
    /// # Errors
    /// I/O errors reading the file, or a YAML parse error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            default_level: "info".to_string(),
            module_levels: HashMap::new(),
            log_dir: None,
            log_filename: "app.log".to_string(),
            rotation_size_mb: 10.0,
            backup_count: 5,
            colored_console: true,
            colored_file: false,
            console_enabled: true,
            exit_on_critical: false,
            queue_capacity: 4096,
            lock_timeout_ms: 1000,
            shutdown_grace_ms: 2000,
            timestamp: "human".to_string(),
        }
    }
}

/// Already-parsed values from outside the crate — CLI flags and explicit API
/// arguments. Argument parsing itself lives with the host application; this
/// struct is the boundary. `None` means "not given", so only supplied values
/// participate in precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// `--log-config PATH`.
    pub config_path: Option<PathBuf>,
    /// `--log-level LEVEL`.
    pub default_level: Option<crate::level::Level>,
    /// `--log-dir PATH`.
    pub log_dir: Option<PathBuf>,
    /// `--log-filename NAME`.
    pub log_filename: Option<String>,
    /// `--colored-file`.
    pub colored_file: Option<bool>,
    /// `--no-color` — kills console color; file color is governed separately.
    pub no_color: bool,
    /// `--exit-on-critical`.
    pub exit_on_critical: Option<bool>,
}
