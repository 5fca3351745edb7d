//! Appender trait for log output destinations

use super::{error::Result, record::LogRecord};

/// A pluggable destination for log records.
///
/// Each registered appender is owned by a dedicated worker thread that
/// calls `write` serially, in the order records were dispatched, and calls
/// `close` exactly once after the final write. Errors returned from either
/// method are reported on stderr and counted by the facility metrics; they
/// never reach the dispatch path or other appenders.
pub trait Appender: Send {
    fn name(&self) -> &str;
    fn write(&mut self, record: &LogRecord) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
