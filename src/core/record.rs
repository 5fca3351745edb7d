//! Log record structure

use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reserved MDC key under which Fatal and Panic emissions store the
/// captured call stack.
pub const STACK_TRACE_KEY: &str = "stack_trace";

/// One structured log event.
///
/// Immutable once constructed: the producer builds it, the dispatcher owns
/// it until fan-out, and each appender worker reads it behind a shared
/// reference. The `mdc` map is the point-in-time merge of the producing
/// logger's context and any call-site attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub mdc: HashMap<String, String>,
}

impl LogRecord {
    pub fn new(level: Level, message: impl Into<String>, mdc: HashMap<String, String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            message: message.into(),
            mdc,
        }
    }
}
