//! Timestamp formatting utilities
//!
//! Provides the timestamp layouts used by the built-in formatters.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp layout for formatted records
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Time of day with milliseconds, for interactive consoles: `10:30:45.123`
    TimeOfDay,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, e.g. `"%b %d %Y %H:%M:%S"`
    Custom(String),
}

impl TimestampFormat {
    /// Format a timestamp.
    ///
    /// A custom layout that chrono rejects falls back to [`TimestampFormat::Iso8601`]
    /// instead of panicking inside `Display`.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Iso8601Micros => datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::TimeOfDay => datetime.format("%H:%M:%S%.3f").to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(layout) => {
                let mut out = String::new();
                if write!(out, "{}", datetime.format(layout)).is_err() {
                    return TimestampFormat::Iso8601.format(datetime);
                }
                out
            }
        }
    }

    /// Whether a custom layout only uses specifiers chrono understands.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(layout) => {
                !StrftimeItems::new(layout).any(|item| matches!(item, Item::Error))
            }
            _ => true,
        }
    }
}
