//! The two built-in sinks (rotating file, console) behind one capability
//! interface — the listener depends only on the trait, never on which concrete
//! sink it is writing to.

mod console;
mod file;

pub use console::ConsoleSink;
pub use file::FileSink;

use crate::error::Error;
use crate::fmt::LineCache;
use crate::record::Record;

/// `Send` because sinks are constructed on the initializing thread and handed
/// to the listener thread, which is their sole writer from then on.
pub trait Sink: Send {
    /// Renders and writes one record. The [`LineCache`] memoizes the plain and
    /// colored renditions, so a sink asks for whichever variant it needs
    /// without re-formatting.
    ///
    /// # Errors
    /// I/O errors from the underlying destination. The listener absorbs these;
    /// they never propagate to producers.
    fn write(&mut self, record: &Record, line: &mut LineCache<'_>) -> Result<(), Error>;

    /// Durability point — called before a critical exit and on shutdown.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&mut self) -> Result<(), Error>;
}
