//! Timestamp formatting for the bundled appenders

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for rendered log lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso8601_format() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let formatted = TimestampFormat::Iso8601.format(&dt);
        assert_eq!(formatted, "2025-01-08T10:30:45.000Z");
    }

    #[test]
    fn test_iso8601_micros_format() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let formatted = TimestampFormat::Iso8601Micros.format(&dt);
        assert_eq!(formatted, "2025-01-08T10:30:45.000000Z");
    }

    #[test]
    fn test_unix_millis_format() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let formatted = TimestampFormat::UnixMillis.format(&dt);
        let millis: i64 = formatted.parse().unwrap();
        assert!(millis > 1_000_000_000_000);
    }

    #[test]
    fn test_custom_format() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
        assert_eq!(format.format(&dt), "2025/01/08");
    }
}
