//! The single consumer thread per process. Sole writer of every sink, which
//! removes intra-process write races without any lock on the write path.

use crate::critical::CriticalHandler;
use crate::fmt::{Formatter, LineCache};
use crate::internal;
use crate::output::Sink;
use crate::queue::Event;
use crossbeam_channel::Receiver;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};
use std::thread::JoinHandle;

/// Listener lifecycle. `Draining` means the queue accepts nothing new while
/// everything already queued still reaches the sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Stopped = 0,
    Running = 1,
    Draining = 2,
}

impl State {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Draining,
            _ => Self::Stopped,
        }
    }
}

/// Cross-thread view of the listener: producers gate enqueues on the state,
/// the shutdown path raises the abort flag, operators read the fault counters.
#[derive(Debug)]
pub(crate) struct ListenerShared {
    state: AtomicU8,
    /// Raised when the shutdown grace elapses — remaining queued records are
    /// counted and skipped instead of written.
    abort: AtomicBool,
    sink_faults: AtomicU64,
    shutdown_drops: AtomicU64,
}

impl ListenerShared {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(State::Stopped as u8),
            abort: AtomicBool::new(false),
            sink_faults: AtomicU64::new(0),
            shutdown_drops: AtomicU64::new(0),
        }
    }

    pub(crate) fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: State) {
        self.state.store(state as u8, Ordering::Release);
    }

    pub(crate) fn request_abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    pub(crate) fn sink_faults(&self) -> u64 {
        self.sink_faults.load(Ordering::Acquire)
    }

    pub(crate) fn shutdown_drops(&self) -> u64 {
        self.shutdown_drops.load(Ordering::Acquire)
    }
}

/// Owner of the consumer thread's join handle.
pub struct Listener {
    handle: Option<JoinHandle<()>>,
}

impl Listener {
    /// Spawns the named consumer thread and marks the state `Running`.
    pub(crate) fn spawn(
        rx: Receiver<Event>,
        sinks: Vec<Box<dyn Sink>>,
        formatter: Formatter,
        critical: CriticalHandler,
        shared: Arc<ListenerShared>,
    ) -> std::io::Result<Self> {
        shared.set_state(State::Running);
        let handle = std::thread::Builder::new()
            .name("prismalog-listener".to_string())
            .spawn(move || drain(&rx, sinks, formatter, critical, &shared))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Blocks until the drain loop exits. Called only after the shutdown
    /// sentinel is queued (or the grace-period abort is raised), so the wait
    /// is bounded.
    pub(crate) fn join(&mut self) {
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            internal::diag("LISTENER", "listener thread panicked");
        }
    }
}

fn drain(
    rx: &Receiver<Event>,
    mut sinks: Vec<Box<dyn Sink>>,
    formatter: Formatter,
    critical: CriticalHandler,
    shared: &ListenerShared,
) {
    while let Ok(event) = rx.recv() {
        match event {
            Event::Record(record) => {
                if shared.abort.load(Ordering::Acquire) {
                    // Grace elapsed: count, never write, never silently lose.
                    shared.shutdown_drops.fetch_add(1, Ordering::AcqRel);
                    continue;
                }

                let mut line = LineCache::new(formatter, &record);
                for sink in &mut sinks {
                    // Sinks fail independently; one failing must not skip the
                    // others, and no failure may stop the drain loop.
                    if let Err(e) = sink.write(&record, &mut line) {
                        shared.sink_faults.fetch_add(1, Ordering::AcqRel);
                        let _ = writeln!(
                            std::io::stderr(),
                            "prismalog: sink write failed ({e}): {}",
                            line.plain()
                        );
                    }
                }

                // Strictly after the sink hand-off — termination never races
                // the write it reports.
                critical.observe(&record, &mut sinks);
            }
            Event::Flush(ack) => {
                flush_all(&mut sinks, shared);
                let _ = ack.send(());
            }
            Event::Shutdown(ack) => {
                // Every record queued before the sentinel has been drained by
                // FIFO; flush so the ack means "durable", then stop.
                flush_all(&mut sinks, shared);
                let _ = ack.send(());
                break;
            }
        }
    }

    let skipped = shared.shutdown_drops.load(Ordering::Acquire);
    if skipped > 0 {
        let _ = writeln!(
            std::io::stderr(),
            "prismalog: {skipped} queued records dropped during shutdown"
        );
    }
}

fn flush_all(sinks: &mut [Box<dyn Sink>], shared: &ListenerShared) {
    for sink in sinks {
        if let Err(e) = sink.flush() {
            shared.sink_faults.fetch_add(1, Ordering::AcqRel);
            internal::diag("LISTENER", &format!("sink flush failed: {e}"));
        }
    }
}
