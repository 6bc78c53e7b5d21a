//! Rotating file sink — the only component that touches the log file, and the
//! only one that ever takes the cross-process rotation lock.

use super::Sink;
use crate::error::Error;
use crate::fmt::LineCache;
use crate::lock::RotationLock;
use crate::record::Record;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Owns the single open-for-append handle per (process, path) pair, the
/// tracked byte size, and the rotation lock. Within a process only the
/// listener thread calls into it, so no lock guards the write path itself;
/// the rotation lock coordinates with *other* processes only.
pub struct FileSink {
    path: PathBuf,
    file: File,
    /// Bytes written through this handle since open. Always ≤ the real file
    /// size; other processes append to the same file, so the real size is
    /// re-read under the lock before any rotation decision.
    written: u64,
    /// 0 disables rotation entirely.
    threshold: u64,
    backups: u32,
    lock: RotationLock,
    colored: bool,
}

impl FileSink {
    /// Creates the directory, opens the append handle, and seeds the size
    /// counter from the file's current length so a fresh process joining an
    /// existing log rotates at the right point.
    pub fn open(
        dir: &Path,
        filename: &str,
        threshold: u64,
        backups: u32,
        lock_timeout: Duration,
        colored: bool,
    ) -> Result<Self, Error> {
        fs::create_dir_all(dir)?;
        let path = dir.join(filename);
        let file = open_append(&path)?;
        let written = fs::metadata(&path).map_or(0, |m| m.len());

        Ok(Self {
            lock: RotationLock::for_log(&path, lock_timeout),
            path,
            file,
            written,
            threshold,
            backups,
            colored,
        })
    }

    /// Active log path, for diagnostics.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &str) -> Result<(), Error> {
        // +1 for the trailing newline appended below.
        let len = line.len() as u64 + 1;

        if self.threshold > 0 && self.written + len > self.threshold {
            match self.lock.acquire() {
                Ok(_guard) => {
                    // Authoritative size under the lock — another process may
                    // have rotated (file now small) or grown the file past our
                    // local counter.
                    let actual = fs::metadata(&self.path).map_or(0, |m| m.len());
                    if actual > 0 && actual + len > self.threshold {
                        self.rotate()?;
                    } else {
                        self.written = actual;
                        if actual == 0 {
                            // Someone else rotated; our handle points at the
                            // old, renamed inode. Reopen the fresh file.
                            self.file = open_append(&self.path)?;
                        }
                    }
                }
                // Skip rotation this cycle; the record is still written. File
                // growth is capped by the next successful acquisition.
                Err(Error::LockTimeout(_)) => {}
                Err(e) => return Err(e),
            }
        }

        // One write_all for the whole line including the newline: append-mode
        // writes below the platform's atomic bound never interleave with other
        // processes' lines.
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        self.file.write_all(buf.as_bytes())?;
        self.written += len;
        Ok(())
    }

    /// Backup-chain shift, caller holds the rotation lock: discard `.N`,
    /// rename `.k` → `.k+1` from the top down, move the active file to `.1`,
    /// reopen fresh. An oversized record has already been written whole by the
    /// time this runs — rotation is never decided inside a partially written
    /// line.
    fn rotate(&mut self) -> Result<(), Error> {
        if self.backups == 0 {
            // No chain to shift into; truncate in place.
            fs::remove_file(&self.path)?;
        } else {
            let oldest = backup_path(&self.path, self.backups);
            if oldest.exists() {
                fs::remove_file(&oldest)?;
            }
            for index in (1..self.backups).rev() {
                let from = backup_path(&self.path, index);
                if from.exists() {
                    fs::rename(&from, backup_path(&self.path, index + 1))?;
                }
            }
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }

        self.file = open_append(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Sink for FileSink {
    fn write(&mut self, _record: &Record, line: &mut LineCache<'_>) -> Result<(), Error> {
        let rendered = if self.colored {
            line.colored()
        } else {
            line.plain()
        };
        self.write_line(rendered)
    }

    fn flush(&mut self) -> Result<(), Error> {
        // write_line goes straight to the kernel; this pushes the kernel's
        // copy to stable storage for the critical-exit and shutdown paths.
        self.file.sync_all()?;
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File, Error> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

/// `app.log` → `app.log.3`. Higher index = older.
fn backup_path(path: &Path, index: u32) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{index}"));
    PathBuf::from(name)
}
