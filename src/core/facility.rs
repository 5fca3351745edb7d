//! Log facility: central queue, dispatcher loop, and shutdown sequence
//!
//! A `LogFacility` owns everything that was process-global in older
//! designs: the severity threshold, the base context inherited by every
//! logger, the central bounded queue, the appender registry, and the
//! dispatcher thread. Facilities are ordinary values, so tests can
//! construct several side by side; the usual production setup is one per
//! process.

use super::{
    appender::Appender,
    error::Result,
    level::Level,
    logger::Logger,
    mdc::Mdc,
    metrics::FacilityMetrics,
    record::LogRecord,
    registry::{AppenderRegistry, DEFAULT_APPENDER_QUEUE_CAPACITY},
};
use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Default capacity of the central record queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Default bound on the best-effort drain of the central queue during
/// shutdown.
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(3);

/// State shared between the facility, its loggers, and the dispatcher
/// thread.
pub(crate) struct Shared {
    pub(crate) threshold: RwLock<Level>,
    pub(crate) base: Mdc,
    pub(crate) records: Sender<LogRecord>,
    pub(crate) registry: AppenderRegistry,
    pub(crate) metrics: Arc<FacilityMetrics>,
}

pub struct LogFacility {
    shared: Arc<Shared>,
    kill: Sender<()>,
    done: Receiver<()>,
    dispatcher: Option<thread::JoinHandle<()>>,
}

impl LogFacility {
    /// Create a facility with default configuration and no appenders.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[must_use]
    pub fn builder() -> FacilityBuilder {
        FacilityBuilder::new()
    }

    /// Create a logger inheriting the base context.
    pub fn logger(&self) -> Logger {
        Logger::new(Mdc::from_mdc(&self.shared.base), Arc::clone(&self.shared))
    }

    /// Create a logger overlaying `overrides` onto a snapshot of the base
    /// context. Later keys win on collision; the base context is never
    /// mutated.
    pub fn logger_with(&self, overrides: HashMap<String, String>) -> Logger {
        let mut mdc = self.shared.base.snapshot();
        mdc.extend(overrides);
        Logger::new(Mdc::from_map(mdc), Arc::clone(&self.shared))
    }

    /// Register an appender. Its worker thread starts immediately. Fails
    /// with `FacilityStopped` once shutdown has begun.
    pub fn add_appender(&self, appender: Box<dyn Appender>) -> Result<()> {
        self.shared.registry.register(appender)
    }

    /// Base context inherited by every logger created from this facility.
    pub fn base(&self) -> &Mdc {
        &self.shared.base
    }

    pub fn threshold(&self) -> Level {
        *self.shared.threshold.read()
    }

    pub fn set_threshold(&self, level: Level) {
        *self.shared.threshold.write() = level;
    }

    pub fn metrics(&self) -> &FacilityMetrics {
        &self.shared.metrics
    }

    /// Run the shutdown sequence: stop the dispatcher loop, drain the
    /// central queue within the configured flush window, then close every
    /// appender and wait for its worker to exit.
    ///
    /// Executes at most once; subsequent calls are no-ops returning
    /// `false`. After shutdown, emissions are accepted and discarded, and
    /// registrations fail.
    pub fn shutdown(&mut self) -> bool {
        let Some(dispatcher) = self.dispatcher.take() else {
            return false;
        };

        let _ = self.kill.send(());
        // rendezvous: the dispatcher has finished its bounded flush
        let _ = self.done.recv();

        self.shared.registry.close_all();

        if dispatcher.join().is_err() {
            eprintln!("[fanlog] dispatcher thread panicked during shutdown");
        }
        true
    }
}

impl Default for LogFacility {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogFacility {
    fn drop(&mut self) {
        if self.dispatcher.is_some() {
            self.shutdown();
        }
    }
}

/// Dispatcher thread body.
///
/// RUNNING: race the central queue against the kill signal. DRAINING /
/// FLUSHING: after the kill signal, keep fanning out whatever is still
/// buffered until the queue is observed empty or the flush window elapses.
/// Finally signal the rendezvous and exit.
fn dispatch(
    records: Receiver<LogRecord>,
    kill: Receiver<()>,
    shared: Arc<Shared>,
    done: Sender<()>,
    flush_timeout: Duration,
) {
    loop {
        select! {
            recv(records) -> record => match record {
                Ok(record) => {
                    shared.registry.fan_out(record);
                    shared.metrics.record_dispatched();
                }
                Err(_) => break,
            },
            recv(kill) -> _ => break,
        }
    }

    let deadline = Instant::now() + flush_timeout;
    while Instant::now() < deadline {
        match records.try_recv() {
            Ok(record) => {
                shared.registry.fan_out(record);
                shared.metrics.record_dispatched();
            }
            Err(_) => break,
        }
    }
    if !records.is_empty() {
        // the window is spent; whatever is still buffered is discarded and
        // shows up in records_lost()
        shared.metrics.record_flush_timeout();
    }

    let _ = done.send(());
}

/// Builder for constructing a `LogFacility` with a fluent API
///
/// # Example
/// ```
/// use fanlog::prelude::*;
///
/// let facility = LogFacility::builder()
///     .threshold(Level::Debug)
///     .queue_capacity(256)
///     .base_attribute("service", "api-gateway")
///     .build();
///
/// let logger = facility.logger();
/// logger.info("facility ready");
/// ```
pub struct FacilityBuilder {
    threshold: Level,
    queue_capacity: usize,
    appender_queue_capacity: usize,
    flush_timeout: Duration,
    appenders: Vec<Box<dyn Appender>>,
    base: HashMap<String, String>,
}

impl FacilityBuilder {
    pub fn new() -> Self {
        Self {
            threshold: Level::Trace,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            appender_queue_capacity: DEFAULT_APPENDER_QUEUE_CAPACITY,
            flush_timeout: DEFAULT_FLUSH_TIMEOUT,
            appenders: Vec::new(),
            base: HashMap::new(),
        }
    }

    /// Minimum severity accepted by producers.
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Level) -> Self {
        self.threshold = level;
        self
    }

    /// Capacity of the central record queue. Producers block when it is
    /// full.
    #[must_use = "builder methods return a new value"]
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Capacity of each appender's worker queue.
    #[must_use = "builder methods return a new value"]
    pub fn appender_queue_capacity(mut self, capacity: usize) -> Self {
        self.appender_queue_capacity = capacity;
        self
    }

    /// Bound on the best-effort central-queue drain during shutdown.
    #[must_use = "builder methods return a new value"]
    pub fn flush_timeout(mut self, timeout: Duration) -> Self {
        self.flush_timeout = timeout;
        self
    }

    /// Register an appender at build time.
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Seed the base context with an attribute inherited by every logger.
    #[must_use = "builder methods return a new value"]
    pub fn base_attribute(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.base.insert(key.into(), value.to_string());
        self
    }

    /// Build the facility and start its dispatcher thread.
    pub fn build(self) -> LogFacility {
        let metrics = Arc::new(FacilityMetrics::new());
        let registry = AppenderRegistry::new(self.appender_queue_capacity, Arc::clone(&metrics));

        let (records_tx, records_rx) = bounded(self.queue_capacity);
        let (kill_tx, kill_rx) = bounded(1);
        let (done_tx, done_rx) = bounded(0);

        let shared = Arc::new(Shared {
            threshold: RwLock::new(self.threshold),
            base: Mdc::from_map(self.base),
            records: records_tx,
            registry,
            metrics,
        });

        for appender in self.appenders {
            // the registry cannot be torn down before build() returns
            let _ = shared.registry.register(appender);
        }

        let dispatcher_shared = Arc::clone(&shared);
        let flush_timeout = self.flush_timeout;
        let dispatcher = thread::spawn(move || {
            dispatch(records_rx, kill_rx, dispatcher_shared, done_tx, flush_timeout);
        });

        LogFacility {
            shared,
            kill: kill_tx,
            done: done_rx,
            dispatcher: Some(dispatcher),
        }
    }
}

impl Default for FacilityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
