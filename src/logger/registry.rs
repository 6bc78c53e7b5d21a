//! The process-wide core: one configuration snapshot, one delivery queue, one
//! listener thread. Lifecycle is explicit — `init` publishes a snapshot,
//! `shutdown` drains and stops it. `get_logger` before `init` falls back to a
//! documented default-config initialization rather than failing; `init`
//! remains the supported entry point.

use super::Logger;
use crate::config::{Config, Overrides};
use crate::critical::CriticalHandler;
use crate::fmt::Formatter;
use crate::internal;
use crate::level::Level;
use crate::listener::{Listener, ListenerShared, State};
use crate::output::{ConsoleSink, FileSink, Sink};
use crate::queue::DeliveryQueue;
use crate::record::Record;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

/// Bounded wait for a flush round-trip — flush must never hang a caller on a
/// wedged sink.
const FLUSH_WAIT: Duration = Duration::from_secs(5);

/// Everything sharing the lifetime of one initialized snapshot. Replaced
/// wholesale on re-init; handles created against the old core keep observing
/// it (drained and stopped), never a mix of old and new.
pub(crate) struct Core {
    config: Config,
    queue: DeliveryQueue,
    shared: Arc<ListenerShared>,
    listener: Mutex<Option<Listener>>,
}

impl Core {
    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    /// Gate plus enqueue: a core that is draining or stopped accepts nothing,
    /// and the rejected record is counted, never silently lost.
    pub(crate) fn emit(&self, record: Record) {
        if self.shared.state() == State::Running {
            self.queue.enqueue(record);
        } else {
            self.queue.count_dropped(1);
        }
    }
}

static CORE: RwLock<Option<Arc<Core>>> = RwLock::new(None);

/// Publishes a new snapshot. An already-initialized core is drained and
/// stopped first, so repeated initialization never duplicates file handles or
/// leaks rotation locks; with an identical configuration the on-disk layout is
/// unchanged.
pub fn init(config: Config) {
    init_with_warnings(config, Vec::new());
}

/// Resolves configuration from file, environment, and the given overrides,
/// then initializes. Resolution warnings surface as Warning records through
/// the fresh core — configuration problems degrade, they never fail.
pub fn init_from(overrides: &Overrides) {
    let (config, warnings) = Config::resolve(overrides);
    init_with_warnings(config, warnings);
}

fn init_with_warnings(config: Config, warnings: Vec<String>) -> Arc<Core> {
    // The guard is held across teardown and publish so concurrent inits
    // serialize instead of orphaning each other's listener threads.
    let mut slot = write_lock();
    if let Some(previous) = slot.take() {
        drain_core(&previous, previous.config.shutdown_grace);
    }

    let formatter = Formatter::new(config.timestamp_mode);
    let critical = CriticalHandler::new(config.exit_on_critical);

    let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
    let mut degraded = None;
    match FileSink::open(
        &config.log_dir,
        &config.filename,
        config.rotation_size,
        config.backup_count,
        config.lock_timeout,
        config.colored_file,
    ) {
        Ok(sink) => sinks.push(Box::new(sink)),
        Err(e) => {
            degraded = Some(format!(
                "file sink unavailable ({e}); logging to console only"
            ));
        }
    }
    // Degraded mode overrides a disabled console — records must land somewhere.
    if config.console_enabled || sinks.is_empty() {
        sinks.push(Box::new(ConsoleSink::new(config.colored_console)));
    }

    let (queue, rx) = DeliveryQueue::with_capacity(config.queue_capacity);
    let shared = Arc::new(ListenerShared::new());
    let listener = match Listener::spawn(rx, sinks, formatter, critical, Arc::clone(&shared)) {
        Ok(listener) => Some(listener),
        Err(e) => {
            // Without a listener the core stays Stopped and every emit is
            // counted as dropped.
            internal::diag("INIT", &format!("listener thread failed to start: {e}"));
            shared.set_state(State::Stopped);
            None
        }
    };

    let core = Arc::new(Core {
        config,
        queue,
        shared,
        listener: Mutex::new(listener),
    });
    *slot = Some(Arc::clone(&core));
    drop(slot);

    for warning in warnings {
        core.emit(Record::new(Level::Warning, "prismalog", &warning));
    }
    if let Some(message) = degraded {
        core.emit(Record::new(Level::Warning, "prismalog", &message));
    }
    core
}

/// Handle bound to the current snapshot, with the effective level cached.
#[must_use]
pub fn get_logger(name: &str) -> Logger {
    let core = current().unwrap_or_else(|| init_with_warnings(Config::default(), Vec::new()));
    Logger::bind(name, core)
}

/// Round-trips a flush through the queue: every record enqueued before this
/// call is rendered, written, and synced when it returns. Bounded wait.
pub fn flush() {
    if let Some(core) = current()
        && let Some(ack) = core.queue.request_flush()
    {
        let _ = ack.recv_timeout(FLUSH_WAIT);
    }
}

/// Cooperative shutdown: stop accepting, drain what is queued, join the
/// listener. If the grace period elapses first, the remainder is counted and
/// skipped — bounded, and never silent.
pub fn shutdown(grace: Duration) {
    let core = write_lock().take();
    if let Some(core) = core {
        drain_core(&core, grace);
    }
}

fn drain_core(core: &Core, grace: Duration) {
    core.shared.set_state(State::Draining);

    if let Some(ack) = core.queue.request_shutdown()
        && ack.recv_timeout(grace).is_err()
    {
        core.shared.request_abort();
    }

    if let Some(mut listener) = lock_listener(core).take() {
        listener.join();
    }
    core.shared.set_state(State::Stopped);
}

/// Current listener state, `Stopped` when uninitialized.
#[must_use]
pub fn state() -> State {
    current().map_or(State::Stopped, |core| core.shared.state())
}

/// Sink write/flush failures absorbed since init — observability for operators.
#[must_use]
pub fn sink_faults() -> u64 {
    current().map_or(0, |core| core.shared.sink_faults())
}

/// Records dropped and not yet surfaced as a backpressure notice, plus any
/// skipped by a shutdown overrun.
#[must_use]
pub fn dropped_records() -> u64 {
    current().map_or(0, |core| {
        core.queue.dropped() + core.shared.shutdown_drops()
    })
}

fn current() -> Option<Arc<Core>> {
    CORE.read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn write_lock() -> std::sync::RwLockWriteGuard<'static, Option<Arc<Core>>> {
    CORE.write().unwrap_or_else(PoisonError::into_inner)
}

fn lock_listener(core: &Core) -> std::sync::MutexGuard<'_, Option<Listener>> {
    core.listener.lock().unwrap_or_else(PoisonError::into_inner)
}
