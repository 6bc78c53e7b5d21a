//! ANSI color escapes for console output. 24-bit true color so the level
//! palette renders the same regardless of the terminal's 16-color theme.

use crate::level::Level;
use std::fmt;

/// A dedicated type prevents mixing up raw u8 triples and documents color intent at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// `const` so the level palette can be compile-time constants.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Terminals need the raw `\x1b[38;2;R;G;Bm` escape — callers shouldn't hand-build it.
    #[must_use]
    pub fn fg_ansi(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// Terminates any active SGR styling so subsequent text returns to the terminal default.
    pub const RESET: &'static str = "\x1b[0m";

    /// Bold attribute, paired with red for the highest severity.
    pub const BOLD: &'static str = "\x1b[1m";

    #[must_use]
    pub const fn green() -> Self {
        Self::new(80, 250, 123)
    }

    #[must_use]
    pub const fn yellow() -> Self {
        Self::new(241, 250, 140)
    }

    #[must_use]
    pub const fn red() -> Self {
        Self::new(255, 85, 85)
    }

    #[must_use]
    pub const fn blue() -> Self {
        Self::new(98, 114, 164)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Severity-to-color mapping used for the level token in colored lines.
#[must_use]
pub const fn level_color(level: Level) -> Color {
    match level {
        Level::Debug => Color::blue(),
        Level::Info => Color::green(),
        Level::Warning => Color::yellow(),
        Level::Error | Level::Critical => Color::red(),
    }
}

/// Convenience wrapper — most callers just want "make this text colored" without
/// managing reset sequences. Critical gets bold on top of red so it stands out
/// in a wall of error output.
#[must_use]
pub fn colorize(text: &str, level: Level) -> String {
    let fg = level_color(level).fg_ansi();
    let reset = Color::RESET;
    if matches!(level, Level::Critical) {
        let bold = Color::BOLD;
        format!("{bold}{fg}{text}{reset}")
    } else {
        format!("{fg}{text}{reset}")
    }
}
