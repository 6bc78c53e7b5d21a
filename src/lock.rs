//! Cross-process mutual exclusion for the rotate-and-reopen sequence.
//!
//! Threads within a process are already serialized by the single listener; this
//! lock exists for the OS processes sharing one log file. It is advisory — an
//! exclusive `flock`-style lock on a sentinel file next to the log, never on
//! the log itself, so lock acquisition can never corrupt log content. The
//! sentinel carries no data.

use crate::error::Error;
use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Retry cadence while another process holds the lock. Rotation critical
/// sections are a handful of renames, so contention clears in milliseconds.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Lock bound to one log file's sentinel path. Cheap to hold; opening the
/// sentinel happens per acquisition.
#[derive(Debug, Clone)]
pub struct RotationLock {
    path: PathBuf,
    timeout: Duration,
}

impl RotationLock {
    /// Derives the sentinel path from the log path: `app.log` → `app.log.lock`.
    #[must_use]
    pub fn for_log(log_path: &Path, timeout: Duration) -> Self {
        let mut sentinel = log_path.as_os_str().to_os_string();
        sentinel.push(".lock");
        Self {
            path: PathBuf::from(sentinel),
            timeout,
        }
    }

    /// Blocks up to the bounded timeout. On `Error::LockTimeout` the caller
    /// skips rotation for this cycle and writes anyway — rotation is best-effort
    /// size control, never a requirement for record delivery.
    pub fn acquire(&self) -> Result<RotationGuard, Error> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&self.path)?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match file.try_lock() {
                Ok(()) => return Ok(RotationGuard { file }),
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(Error::LockTimeout(self.path.clone()));
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
                Err(TryLockError::Error(e)) => return Err(e.into()),
            }
        }
    }

    /// Sentinel location, for tests and diagnostics.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Held for the duration of one rotate-and-reopen sequence. Releases in `Drop`,
/// which covers every exit path — normal completion, `?` propagation, and
/// panics alike.
#[derive(Debug)]
pub struct RotationGuard {
    file: File,
}

impl Drop for RotationGuard {
    fn drop(&mut self) {
        // Closing the descriptor would release the lock anyway; the explicit
        // unlock makes the release immediate rather than close-ordered.
        let _ = self.file.unlock();
    }
}
