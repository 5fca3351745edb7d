//! Record producer

use super::{
    facility::Shared,
    level::Level,
    mdc::Mdc,
    record::{LogRecord, STACK_TRACE_KEY},
};
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::sync::Arc;

/// A producer of log records.
///
/// Every logger owns its context: emitted records carry a snapshot of it,
/// and `derive` builds children by overlaying onto a snapshot, so parent
/// and child never share mutable state. Loggers are cheap to create and
/// safe to share across threads.
pub struct Logger {
    mdc: Mdc,
    shared: Arc<Shared>,
}

impl Logger {
    pub(crate) fn new(mdc: Mdc, shared: Arc<Shared>) -> Self {
        Self { mdc, shared }
    }

    /// This logger's context. Attributes put here appear on every record
    /// emitted afterwards.
    pub fn mdc(&self) -> &Mdc {
        &self.mdc
    }

    /// Create a child logger overlaying `overrides` onto a snapshot of
    /// this logger's context. The parent is unaffected.
    pub fn derive(&self, overrides: HashMap<String, String>) -> Logger {
        let mut mdc = self.mdc.snapshot();
        mdc.extend(overrides);
        Logger::new(Mdc::from_map(mdc), Arc::clone(&self.shared))
    }

    /// Whether an emission at `level` would pass the facility threshold.
    pub fn enabled(&self, level: Level) -> bool {
        level != Level::Off && *self.shared.threshold.read() <= level
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.enabled(Level::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.enabled(Level::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.enabled(Level::Error)
    }

    pub fn is_fatal_enabled(&self) -> bool {
        self.enabled(Level::Fatal)
    }

    pub fn is_panic_enabled(&self) -> bool {
        self.enabled(Level::Panic)
    }

    /// Emit a record at `level`, overlaying `attributes` onto a snapshot of
    /// this logger's context.
    ///
    /// Below-threshold calls return immediately without snapshotting or
    /// constructing anything. Fatal and Panic emissions additionally
    /// capture the call stack under [`STACK_TRACE_KEY`]. The enqueue
    /// blocks while the central queue is full (backpressure); once the
    /// facility is shut down the record is accepted and discarded.
    ///
    /// # Panics
    ///
    /// An enabled `Level::Panic` emission panics with the formatted message
    /// as payload after the record is handed off, even when the hand-off
    /// found the facility already stopped. A disabled one does not.
    pub fn log_at(
        &self,
        level: Level,
        attributes: Option<HashMap<String, String>>,
        message: impl Into<String>,
    ) {
        if level == Level::Off || !self.enabled(level) {
            return;
        }

        let mut mdc = self.mdc.snapshot();
        if let Some(attributes) = attributes {
            mdc.extend(attributes);
        }

        if matches!(level, Level::Fatal | Level::Panic) {
            mdc.insert(
                STACK_TRACE_KEY.to_string(),
                Backtrace::force_capture().to_string(),
            );
        }

        let message = message.into();
        let panic_payload = (level == Level::Panic).then(|| message.clone());

        let record = LogRecord::new(level, message, mdc);
        if self.shared.records.send(record).is_ok() {
            self.shared.metrics.record_enqueued();
        }

        if let Some(payload) = panic_payload {
            panic!("{}", payload);
        }
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log_at(Level::Trace, None, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log_at(Level::Debug, None, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log_at(Level::Info, None, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log_at(Level::Warn, None, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log_at(Level::Error, None, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log_at(Level::Fatal, None, message);
    }

    /// Emit at Panic severity and then panic with the message as payload.
    /// Returns normally only when the severity is disabled.
    #[inline]
    pub fn panic(&self, message: impl Into<String>) {
        self.log_at(Level::Panic, None, message);
    }

    pub fn trace_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Trace, Some(attributes), message);
    }

    pub fn debug_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Debug, Some(attributes), message);
    }

    pub fn info_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Info, Some(attributes), message);
    }

    pub fn warn_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Warn, Some(attributes), message);
    }

    pub fn error_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Error, Some(attributes), message);
    }

    pub fn fatal_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Fatal, Some(attributes), message);
    }

    /// See [`Logger::panic`].
    pub fn panic_with(&self, attributes: HashMap<String, String>, message: impl Into<String>) {
        self.log_at(Level::Panic, Some(attributes), message);
    }
}

impl Clone for Logger {
    /// Cloning snapshots the context, like `derive` with no overrides.
    fn clone(&self) -> Self {
        self.derive(HashMap::new())
    }
}
