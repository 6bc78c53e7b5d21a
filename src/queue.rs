//! Bounded in-process funnel between producer threads and the listener.
//!
//! Producers never block here: when the queue is full the record is dropped and
//! counted, and the count is surfaced later as a single synthetic warning
//! record. Logging must never stall application logic, so overflow trades
//! records for a deterministic latency bound.

use crate::level::Level;
use crate::record::Record;
use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything the listener thread can receive. Control events travel through
/// the same channel as records so they observe FIFO order relative to the
/// records queued before them — a `Shutdown` arrives only after everything
/// already enqueued has been drained.
pub enum Event {
    Record(Record),
    /// Flush all sinks, then ack.
    Flush(Sender<()>),
    /// Ack and leave the drain loop.
    Shutdown(Sender<()>),
}

/// Producer side of the funnel. Shared by every [`Logger`](crate::Logger)
/// handle in the process; the single listener owns the other end.
pub struct DeliveryQueue {
    tx: Sender<Event>,
    /// Records rejected since the last successful enqueue. Swapped to zero when
    /// the synthetic notice goes out, added back if the notice itself cannot be
    /// queued — the count is never double reported and never lost.
    dropped: AtomicU64,
}

impl DeliveryQueue {
    /// Builds the channel pair; the receiver goes to the listener thread.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> (Self, Receiver<Event>) {
        let (tx, rx) = bounded(capacity);
        (
            Self {
                tx,
                dropped: AtomicU64::new(0),
            },
            rx,
        )
    }

    /// Non-blocking enqueue. Returns whether the record was accepted; a `false`
    /// is already counted, so callers never need to retry or report it.
    pub fn enqueue(&self, record: Record) -> bool {
        match self.tx.try_send(Event::Record(record)) {
            Ok(()) => {
                self.inject_drop_notice();
                true
            }
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                self.dropped.fetch_add(1, Ordering::AcqRel);
                false
            }
        }
    }

    /// Emits the pending drop count as one synthetic record, piggybacked on the
    /// first enqueue that gets through after an overflow episode.
    fn inject_drop_notice(&self) {
        let n = self.dropped.swap(0, Ordering::AcqRel);
        if n == 0 {
            return;
        }
        let notice = Record::new(
            Level::Warning,
            "prismalog",
            &format!("{n} records dropped by delivery queue backpressure"),
        );
        if self.tx.try_send(Event::Record(notice)).is_err() {
            self.dropped.fetch_add(n, Ordering::AcqRel);
        }
    }

    /// Queues a flush behind everything already enqueued. `None` when the
    /// listener is gone.
    #[must_use]
    pub fn request_flush(&self) -> Option<Receiver<()>> {
        let (ack, rx) = bounded(1);
        self.tx.send(Event::Flush(ack)).ok().map(|()| rx)
    }

    /// Queues the shutdown sentinel behind everything already enqueued, which
    /// is exactly the draining contract: queued records flush first.
    #[must_use]
    pub fn request_shutdown(&self) -> Option<Receiver<()>> {
        let (ack, rx) = bounded(1);
        self.tx.send(Event::Shutdown(ack)).ok().map(|()| rx)
    }

    /// Drops not yet surfaced as a notice — observability for tests and operators.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Acquire)
    }

    /// Late drops during shutdown are counted here so they are never silent.
    pub(crate) fn count_dropped(&self, n: u64) {
        self.dropped.fetch_add(n, Ordering::AcqRel);
    }
}
