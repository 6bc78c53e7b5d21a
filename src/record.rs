//! The immutable value handed from producers to the listener — carries everything
//! a sink needs so formatting never has to reach back into producer state.

use crate::level::Level;
use chrono::{DateTime, Local};
use std::panic::Location;

/// Emit call site, resolved through `#[track_caller]` so wrapper methods on
/// [`Logger`](crate::Logger) report the caller's file and line, not their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    /// Must be called from a `#[track_caller]` chain to point at the real emit site.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }

    /// Just the filename — full paths would dominate every formatted line.
    #[must_use]
    pub fn basename(&self) -> &'static str {
        self.file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.file)
    }
}

/// One structured log event. Created once per emit, never mutated afterwards;
/// owned by the delivery queue until drained, then read by the formatter.
#[derive(Debug, Clone)]
pub struct Record {
    /// Wall clock at the emit call, before the record enters the queue.
    pub timestamp: DateTime<Local>,
    pub level: Level,
    /// Dotted hierarchical logger name — drives longest-prefix level resolution.
    pub logger: String,
    /// Fully rendered message; argument interpolation happens at the call site.
    pub message: String,
    pub pid: u32,
    /// Name of the emitting thread, or its numeric id when unnamed.
    pub thread: String,
    pub source: SourceLocation,
}

impl Record {
    /// Captures timestamp, process, thread, and call site at the moment of emit —
    /// none of these can be reconstructed later on the listener thread.
    #[must_use]
    #[track_caller]
    pub fn new(level: Level, logger: &str, message: &str) -> Self {
        let current = std::thread::current();
        let thread = current.name().map_or_else(
            || format!("{:?}", current.id()),
            std::string::ToString::to_string,
        );

        Self {
            timestamp: Local::now(),
            level,
            logger: logger.to_string(),
            message: message.to_string(),
            pid: std::process::id(),
            thread,
            source: SourceLocation::caller(),
        }
    }
}
