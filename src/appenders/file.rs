//! File appender implementation

use crate::core::{Appender, LogRecord, Result, TimestampFormat};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct FileAppender {
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Appender for FileAppender {
    fn name(&self) -> &str {
        "file"
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let timestamp_str = self.timestamp_format.format(&record.timestamp);

        let mut line = format!(
            "[{}] [{:5}] {}",
            timestamp_str,
            record.level.to_str(),
            record.message
        );

        if !record.mdc.is_empty() {
            line.push_str(" |");
            for (key, value) in &record.mdc {
                line.push_str(&format!(" {}={}", key, value));
            }
        }

        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
