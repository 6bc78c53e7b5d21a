#![forbid(unsafe_code)]

//! `prismalog` - Process-safe logging with rotation and colored output.
//!
//! Many independent producers — threads in one process, and multiple OS
//! processes sharing the same log files — emit records concurrently; prismalog
//! guarantees they reach disk without interleaving or corruption, rotating
//! files by size and mirroring records to a colorized console stream.
//!
//! - Bounded delivery queue per process: producers never block, overflow is
//!   dropped, counted, and surfaced as a single synthetic warning record
//! - One listener thread per process is the sole writer of every sink
//! - Size-based rotation with numbered backups, coordinated across processes
//!   by an advisory lock on a sentinel file
//! - Colored console output, suppressed automatically on non-terminals
//! - Optional process termination on critical records, after a durable flush
//!
//! # Example
//!
//! ```no_run
//! use prismalog::{Config, get_logger, shutdown};
//! use std::time::Duration;
//!
//! prismalog::init(Config::default());
//!
//! let log = get_logger("app.startup");
//! log.info("Application started");
//! log.debug("Cache warmed in 42ms");
//! log.warning("Config file missing, using defaults");
//!
//! shutdown(Duration::from_secs(2));
//! ```
//!
//! Configuration resolves from a YAML file, `LOG_*` environment variables, and
//! host-supplied [`Overrides`], highest precedence last:
//!
//! ```no_run
//! use prismalog::{Overrides, init_from};
//!
//! let overrides = Overrides {
//!     log_dir: Some("/var/log/myapp".into()),
//!     no_color: true,
//!     ..Overrides::default()
//! };
//! init_from(&overrides);
//! ```

pub mod config;
pub mod critical;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod listener;
pub mod lock;
pub mod logger;
pub mod output;
pub mod queue;
pub mod record;

// Re-exports for convenience
pub use config::{Config, Overrides};
pub use critical::CriticalHandler;
pub use error::Error;
pub use fmt::{Color, Formatter, TimestampMode};
pub use level::Level;
pub use listener::{Listener, State};
pub use lock::{RotationGuard, RotationLock};
pub use logger::{
    Logger, dropped_records, flush, get_logger, init, init_from, shutdown, sink_faults, state,
};
pub use output::{ConsoleSink, FileSink, Sink};
pub use queue::DeliveryQueue;
pub use record::{Record, SourceLocation};
