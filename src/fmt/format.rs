//! Line rendering for all sinks. The field order is fixed; the only per-sink
//! variation is whether the level token carries ANSI color.

use super::color::colorize;
use crate::record::Record;

/// Numeric timestamps render faster and sort trivially; human-readable ones are
/// what operators actually grep. Pure formatting choice — ordering and locking
/// behavior never depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampMode {
    #[default]
    Human,
    Unix,
}

/// Renders a [`Record`] into one line of text. Pure — no shared state, safe to
/// call from any thread, though in practice only the listener formats.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    timestamp_mode: TimestampMode,
}

impl Formatter {
    #[must_use]
    pub const fn new(timestamp_mode: TimestampMode) -> Self {
        Self { timestamp_mode }
    }

    fn render_timestamp(self, record: &Record) -> String {
        match self.timestamp_mode {
            TimestampMode::Human => record.timestamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            // Fixed 6-digit fraction keeps the column width stable for line-oriented tooling.
            TimestampMode::Unix => {
                let micros = record.timestamp.timestamp_micros();
                format!("{}.{:06}", micros / 1_000_000, (micros % 1_000_000).abs())
            }
        }
    }

    /// The rendition written to files and non-colored consoles.
    #[must_use]
    pub fn plain(self, record: &Record) -> String {
        format!(
            "{} - {}:{} - {} - [{}] - [{}:{}] - {}",
            self.render_timestamp(record),
            record.source.basename(),
            record.source.line,
            record.logger,
            record.level.label(),
            record.pid,
            record.thread,
            record.message,
        )
    }

    /// Identical to [`Self::plain`] except the level token is wrapped in ANSI
    /// escapes — byte layout otherwise unchanged so colored and plain lines
    /// stay diffable.
    #[must_use]
    pub fn colored(self, record: &Record) -> String {
        format!(
            "{} - {}:{} - {} - [{}] - [{}:{}] - {}",
            self.render_timestamp(record),
            record.source.basename(),
            record.source.line,
            record.logger,
            colorize(record.level.label(), record.level),
            record.pid,
            record.thread,
            record.message,
        )
    }
}

/// Per-record memo of the plain and colored renditions. Several sinks may
/// consume one record with different color settings; each variant is formatted
/// at most once no matter how many sinks ask for it.
pub struct LineCache<'a> {
    formatter: Formatter,
    record: &'a Record,
    plain: Option<String>,
    colored: Option<String>,
}

impl<'a> LineCache<'a> {
    #[must_use]
    pub const fn new(formatter: Formatter, record: &'a Record) -> Self {
        Self {
            formatter,
            record,
            plain: None,
            colored: None,
        }
    }

    pub fn plain(&mut self) -> &str {
        self.plain
            .get_or_insert_with(|| self.formatter.plain(self.record))
    }

    pub fn colored(&mut self) -> &str {
        self.colored
            .get_or_insert_with(|| self.formatter.colored(self.record))
    }
}
