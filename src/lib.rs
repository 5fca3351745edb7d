//! # fanlog
//!
//! An in-process asynchronous log-distribution facility. Producers attach
//! mapped-diagnostic-context metadata to structured records; a dispatcher
//! thread fans records out from a central bounded queue to per-appender
//! worker threads, so producers never block on slow output targets.
//! Shutdown drains in-flight records within a bounded window before
//! closing every appender.
//!
//! ## Features
//!
//! - **Non-blocking producers**: appender I/O happens on dedicated worker
//!   threads; a full queue applies backpressure instead of dropping
//!   records
//! - **Mapped diagnostic context**: per-logger key/value metadata with
//!   snapshot/overlay derivation
//! - **Pluggable appenders**: console, file, and logstash included; any
//!   [`Appender`] implementation can be registered
//! - **Orderly shutdown**: bounded drain, per-appender close hooks, worker
//!   barrier
//!
//! ## Example
//!
//! ```
//! use fanlog::prelude::*;
//!
//! let mut facility = LogFacility::builder()
//!     .threshold(Level::Info)
//!     .base_attribute("service", "api-gateway")
//!     .build();
//!
//! let logger = facility.logger();
//! logger.info("server started");
//!
//! let request_logger = logger.derive(
//!     [("request_id".to_string(), "abc-123".to_string())].into(),
//! );
//! request_logger.warn("slow upstream");
//!
//! facility.shutdown();
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    pub use crate::appenders::{FileAppender, LogstashAppender, LogstashVersion};
    pub use crate::core::{
        Appender, FacilityBuilder, FacilityMetrics, FanlogError, Level, LogFacility, LogRecord,
        Logger, Mdc, Result, TimestampFormat, DEFAULT_APPENDER_QUEUE_CAPACITY,
        DEFAULT_FLUSH_TIMEOUT, DEFAULT_QUEUE_CAPACITY, STACK_TRACE_KEY,
    };
}

#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
pub use appenders::{FileAppender, LogstashAppender, LogstashVersion};
pub use crate::core::{
    Appender, FacilityBuilder, FacilityMetrics, FanlogError, Level, LogFacility, LogRecord,
    Logger, Mdc, Result, TimestampFormat, DEFAULT_APPENDER_QUEUE_CAPACITY, DEFAULT_FLUSH_TIMEOUT,
    DEFAULT_QUEUE_CAPACITY, STACK_TRACE_KEY,
};
