//! Logstash appender for structured event streams
//!
//! Emits one logstash-formatted JSON event per line to any writer.
//! Version 0 nests the MDC under `@fields`; version 1 flattens it at the
//! top level. Both carry `level`, `@message`, and a microsecond-precision
//! `@timestamp`.

use crate::core::{Appender, LogRecord, Result};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

const LOGSTASH_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Logstash event schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogstashVersion {
    V0,
    V1,
}

pub struct LogstashAppender<W: Write + Send> {
    writer: BufWriter<W>,
    version: LogstashVersion,
    pretty: bool,
}

impl LogstashAppender<File> {
    /// Open (or create) a file and append logstash events to it.
    pub fn create<P: AsRef<Path>>(path: P, version: LogstashVersion) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, version))
    }
}

impl<W: Write + Send> LogstashAppender<W> {
    pub fn new(writer: W, version: LogstashVersion) -> Self {
        Self {
            writer: BufWriter::new(writer),
            version,
            pretty: false,
        }
    }

    /// Emit indented JSON instead of one event per line.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn event(&self, record: &LogRecord) -> Value {
        let timestamp = record.timestamp.format(LOGSTASH_TIMESTAMP).to_string();

        match self.version {
            LogstashVersion::V0 => {
                let mut fields = Map::new();
                for (key, value) in &record.mdc {
                    fields.insert(key.clone(), Value::String(value.clone()));
                }
                fields.insert(
                    "level".to_string(),
                    Value::String(record.level.to_str().to_string()),
                );

                let mut event = Map::new();
                event.insert("@fields".to_string(), Value::Object(fields));
                event.insert("@message".to_string(), Value::String(record.message.clone()));
                event.insert("@timestamp".to_string(), Value::String(timestamp));
                Value::Object(event)
            }
            LogstashVersion::V1 => {
                let mut event = Map::new();
                for (key, value) in &record.mdc {
                    event.insert(key.clone(), Value::String(value.clone()));
                }
                event.insert(
                    "level".to_string(),
                    Value::String(record.level.to_str().to_string()),
                );
                event.insert("@message".to_string(), Value::String(record.message.clone()));
                event.insert("@timestamp".to_string(), Value::String(timestamp));
                Value::Object(event)
            }
        }
    }
}

impl<W: Write + Send> Appender for LogstashAppender<W> {
    fn name(&self) -> &str {
        "logstash"
    }

    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let event = self.event(record);

        let json = if self.pretty {
            serde_json::to_string_pretty(&event)?
        } else {
            serde_json::to_string(&event)?
        };

        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
