//! Console appender implementation

use crate::core::{Appender, Level, LogRecord, Result, TimestampFormat};
use colored::Colorize;

/// Writes human-readable lines to the terminal.
///
/// Error, Fatal, and Panic records go to stderr, everything else to
/// stdout. MDC entries are appended as `key=value` pairs.
pub struct ConsoleAppender {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set a custom timestamp format using a strftime-compatible format string
    #[must_use]
    pub fn with_custom_timestamp(mut self, format_str: &str) -> Self {
        self.timestamp_format = TimestampFormat::Custom(format_str.to_string());
        self
    }

    fn format_line(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", record.level.to_str())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:5}", record.level.to_str())
        };

        let timestamp_str = self.timestamp_format.format(&record.timestamp);

        let mut line = format!("[{}] [{}] {}", timestamp_str, level_str, record.message);

        for (key, value) in &record.mdc {
            line.push_str(&format!(" {}={}", key, value));
        }

        line
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn name(&self) -> &str {
        "console"
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = self.format_line(record);

        match record.level {
            Level::Error | Level::Fatal | Level::Panic => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}
