//! Appender implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;
pub mod logstash;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;
pub use file::FileAppender;
pub use logstash::{LogstashAppender, LogstashVersion};

// Re-export the trait for convenience
pub use crate::core::Appender;
