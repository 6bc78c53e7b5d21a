//! Record rendering — one fixed field order, with color as a per-sink choice
//! rather than a property of the record itself.

mod color;
mod format;

pub use color::{Color, colorize, level_color};
pub use format::{Formatter, LineCache, TimestampMode};
