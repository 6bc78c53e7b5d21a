//! Producer-facing handles and the process-wide registry behind them.

mod registry;

pub use registry::{
    dropped_records, flush, get_logger, init, init_from, shutdown, sink_faults, state,
};

pub(crate) use registry::Core;

use crate::level::Level;
use crate::record::Record;
use std::sync::Arc;

/// Cheap handle bound to one dotted logger name. The effective level is
/// resolved once at creation (longest-prefix match over the snapshot) and
/// cached, so the per-emit filter is a single comparison.
///
/// Every emit method is effectively non-throwing: below-level records return
/// early, and a full or stopped queue counts the record as dropped instead of
/// surfacing an error to the call site.
#[derive(Clone)]
pub struct Logger {
    name: String,
    level: Level,
    core: Arc<Core>,
}

impl Logger {
    pub(crate) fn bind(name: &str, core: Arc<Core>) -> Self {
        Self {
            name: name.to_string(),
            level: core.config().level_for(name),
            core,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cached longest-prefix resolution — what actually gates emits.
    #[must_use]
    pub const fn effective_level(&self) -> Level {
        self.level
    }

    /// Core emit path. `#[track_caller]` so the record's source location is
    /// the application call site, not this wrapper.
    #[track_caller]
    pub fn log(&self, level: Level, message: &str) {
        if level < self.level {
            return;
        }
        self.core.emit(Record::new(level, &self.name, message));
    }

    /// Development-time diagnostics.
    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    /// Normal operational milestones.
    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Non-fatal anomalies that may need attention.
    #[track_caller]
    pub fn warning(&self, message: &str) {
        self.log(Level::Warning, message);
    }

    /// Unrecoverable failures of a single operation.
    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }

    /// Highest severity. With `exit_on_critical` set, the process terminates
    /// after this record reaches durable storage.
    #[track_caller]
    pub fn critical(&self, message: &str) {
        self.log(Level::Critical, message);
    }
}
