//! Logging macros for ergonomic message formatting.
//!
//! The macros check whether the level is enabled before touching the
//! format arguments, so a disabled call formats nothing and allocates
//! nothing.
//!
//! # Examples
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::info;
//!
//! let facility = LogFacility::new();
//! let logger = facility.logger();
//!
//! info!(logger, "server started");
//!
//! let port = 8080;
//! info!(logger, "listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let facility = LogFacility::new();
/// # let logger = facility.logger();
/// use fanlog::log;
/// log!(logger, Level::Info, "simple message");
/// log!(logger, Level::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log_at(level, None, format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message. Captures a stack trace into the record.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Fatal, $($arg)+)
    };
}

/// Log at panic severity, then panic with the formatted message.
///
/// Returns normally only when the severity is disabled. Named
/// `log_panic!` to leave the std `panic!` macro alone.
///
/// ```should_panic
/// # use fanlog::prelude::*;
/// # let facility = LogFacility::new();
/// # let logger = facility.logger();
/// use fanlog::log_panic;
/// log_panic!(logger, "unrecoverable: {}", "disk gone");
/// ```
#[macro_export]
macro_rules! log_panic {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Panic, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Level, LogFacility};

    #[test]
    fn test_log_macro() {
        let facility = LogFacility::new();
        let logger = facility.logger();
        log!(logger, Level::Info, "test message");
        log!(logger, Level::Info, "formatted: {}", 42);
    }

    #[test]
    fn test_level_macros() {
        let facility = LogFacility::new();
        let logger = facility.logger();
        trace!(logger, "trace message");
        debug!(logger, "count: {}", 5);
        info!(logger, "items: {}", 100);
        warn!(logger, "retry {} of {}", 1, 3);
        error!(logger, "code: {}", 500);
        fatal!(logger, "critical failure: {}", "system");
    }

    #[test]
    fn test_disabled_macro_skips_formatting() {
        struct Tracker(std::sync::atomic::AtomicBool);
        impl std::fmt::Display for Tracker {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.store(true, std::sync::atomic::Ordering::SeqCst);
                write!(f, "formatted")
            }
        }

        let facility = LogFacility::builder().threshold(Level::Error).build();
        let logger = facility.logger();
        let tracker = Tracker(std::sync::atomic::AtomicBool::new(false));

        debug!(logger, "value: {}", tracker);
        assert!(!tracker.0.load(std::sync::atomic::Ordering::SeqCst));

        error!(logger, "value: {}", tracker);
        assert!(tracker.0.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_log_panic_macro_panics() {
        let facility = LogFacility::new();
        let logger = facility.logger();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            log_panic!(logger, "boom: {}", 7);
        }));
        assert!(result.is_err());
    }
}
