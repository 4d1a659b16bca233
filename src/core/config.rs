//! Serializable logger configuration
//!
//! Meant for externally supplied settings (config files, environment). Unlike
//! runtime level changes, a configured level name is validated strictly.

use super::error::{LoggerError, Result};
use super::formatter::{Formatter, FormatterConfig, JsonFormatter, MessageFormatter, TextFormatter};
use super::level::{parse_level, Level};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which built-in formatter a configured logger uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    #[default]
    Message,
    Text,
    Json,
}

/// Logger settings
///
/// # Example
///
/// ```
/// use rust_leveled_logger::core::LoggerConfig;
///
/// let config: LoggerConfig = serde_json::from_str(r#"{"level": "warning", "format": "text"}"#)?;
/// assert!(config.validate().is_ok());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    pub extra_call_depth: usize,
    pub format: FormatKind,
    pub timestamp_format: TimestampFormat,
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug.as_str().to_string(),
            extra_call_depth: 0,
            format: FormatKind::default(),
            timestamp_format: TimestampFormat::default(),
            colors: false,
        }
    }
}

impl LoggerConfig {
    /// Check the configuration and return the configured level.
    ///
    /// Unknown level names fail with [`LoggerError::InvalidLevel`]; a custom
    /// timestamp layout chrono cannot render fails with
    /// [`LoggerError::InvalidConfiguration`].
    pub fn validate(&self) -> Result<Level> {
        let level = parse_level(&self.level)?;
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "LoggerConfig.timestamp_format",
                format!("unsupported layout {:?}", self.timestamp_format),
            ));
        }
        Ok(level)
    }

    /// Build the configured formatter.
    pub fn formatter(&self) -> Arc<dyn Formatter> {
        match self.format {
            FormatKind::Message => Arc::new(MessageFormatter),
            FormatKind::Text => Arc::new(TextFormatter::new(
                FormatterConfig::new()
                    .with_timestamp_format(self.timestamp_format.clone())
                    .with_colors(self.colors),
            )),
            FormatKind::Json => Arc::new(JsonFormatter::new(self.timestamp_format.clone())),
        }
    }
}
