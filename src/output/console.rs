//! Console mirror — Warning and above to stderr, the rest to stdout, so shell
//! redirection separates operational noise from real problems. Completely
//! independent of file rotation state.

use super::Sink;
use crate::error::Error;
use crate::fmt::LineCache;
use crate::level::Level;
use crate::record::Record;
use std::io::{self, IsTerminal, Write};

/// Holds only the per-stream color decision; the streams themselves are the
/// process globals.
pub struct ConsoleSink {
    /// Color is resolved per stream: a piped stdout with an interactive stderr
    /// is common (`app > out.txt`), and ANSI escapes in the pipe would corrupt
    /// downstream tooling.
    color_stdout: bool,
    color_stderr: bool,
}

impl ConsoleSink {
    /// `colored` is the configured wish; each stream additionally has to be an
    /// interactive terminal for the wish to take effect.
    #[must_use]
    pub fn new(colored: bool) -> Self {
        Self {
            color_stdout: colored && io::stdout().is_terminal(),
            color_stderr: colored && io::stderr().is_terminal(),
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &Record, line: &mut LineCache<'_>) -> Result<(), Error> {
        if record.level >= Level::Warning {
            let rendered = if self.color_stderr {
                line.colored()
            } else {
                line.plain()
            };
            writeln!(io::stderr(), "{rendered}")?;
        } else {
            let rendered = if self.color_stdout {
                line.colored()
            } else {
                line.plain()
            };
            writeln!(io::stdout(), "{rendered}")?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Error> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}
