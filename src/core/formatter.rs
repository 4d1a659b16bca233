//! Formatters turn a record into one line of output
//!
//! Backends never format records themselves: the leveled adapter attaches a
//! formatter to the record and the backend asks for
//! [`Record::formatted`](super::record::Record::formatted).
//!
//! # Default formatter lifecycle
//!
//! Adapters without a configured formatter resolve the process-wide default
//! the first time they log and keep it from then on. Set the default once at
//! startup, before any logger dispatches, with [`init_default_formatter`] or
//! [`set_default_formatter`]. Later changes only reach adapters that have not
//! logged yet.

use super::error::{LoggerError, Result};
use super::record::Record;
use super::timestamp::TimestampFormat;
use parking_lot::RwLock;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Renders a record into `out`.
pub trait Formatter: Send + Sync {
    /// `call_depth` counts the wrapping layers between the caller and this
    /// formatter. The caller's location is also carried on the record.
    fn format(&self, call_depth: usize, record: &Record, out: &mut dyn Write) -> io::Result<()>;

    fn name(&self) -> &str {
        "formatter"
    }
}

/// Writes the rendered message and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl Formatter for MessageFormatter {
    fn format(&self, _call_depth: usize, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(record.message().as_bytes())
    }

    fn name(&self) -> &str {
        "message"
    }
}

/// Configuration for [`TextFormatter`]
///
/// # Examples
///
/// ```
/// use rust_leveled_logger::core::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::TimeOfDay)
///     .with_level_width(Some(4));
/// ```
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    pub timestamp_format: TimestampFormat,
    pub include_file_location: bool,
    pub include_sequence: bool,
    /// Truncate level names to this many characters (`WARN` for `WARNING`)
    pub level_width: Option<usize>,
    pub use_colors: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            include_file_location: true,
            include_sequence: false,
            level_width: Some(4),
            use_colors: false,
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_include_file_location(mut self, include: bool) -> Self {
        self.include_file_location = include;
        self
    }

    #[must_use]
    pub fn with_include_sequence(mut self, include: bool) -> Self {
        self.include_sequence = include;
        self
    }

    #[must_use]
    pub fn with_level_width(mut self, width: Option<usize>) -> Self {
        self.level_width = width;
        self
    }

    /// Colors need the `console` feature and are ignored without it.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }
}

/// Human-readable single-line layout:
/// `2025-01-08T10:30:45.123Z main.rs:42 ▶ WARN disk almost full`
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    config: FormatterConfig,
}

impl TextFormatter {
    pub fn new(config: FormatterConfig) -> Self {
        Self { config }
    }

    fn level_text(&self, record: &Record) -> String {
        let name = record.level().as_str();
        let name = match self.config.level_width {
            Some(width) => &name[..width.min(name.len())],
            None => name,
        };

        #[cfg(feature = "console")]
        if self.config.use_colors {
            use colored::Colorize;
            return name.color(record.level().color()).bold().to_string();
        }

        name.to_string()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, _call_depth: usize, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        write!(out, "{}", self.config.timestamp_format.format(&record.time()))?;
        if self.config.include_sequence {
            write!(out, " #{}", record.id())?;
        }
        if self.config.include_file_location {
            if let Some(location) = record.location() {
                write!(out, " {}:{}", short_file(location.file()), location.line())?;
            }
        }
        write!(out, " ▶ {} {}", self.level_text(record), record.message())
    }

    fn name(&self) -> &str {
        "text"
    }
}

fn short_file(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[derive(Serialize)]
struct JsonLine<'a> {
    id: u64,
    timestamp: String,
    level: super::level::Level,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    message: &'a str,
}

/// One JSON object per record, compatible with JSONL collectors.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
}

impl JsonFormatter {
    pub fn new(timestamp_format: TimestampFormat) -> Self {
        Self { timestamp_format }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, _call_depth: usize, record: &Record, out: &mut dyn Write) -> io::Result<()> {
        let location = record.location();
        let line = JsonLine {
            id: record.id(),
            timestamp: self.timestamp_format.format(&record.time()),
            level: record.level(),
            file: location.map(|l| l.file()),
            line: location.map(|l| l.line()),
            message: record.message(),
        };
        serde_json::to_writer(out, &line)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}

struct DefaultFormatter {
    formatter: Arc<dyn Formatter>,
    initialised: bool,
}

static DEFAULT_FORMATTER: OnceLock<RwLock<DefaultFormatter>> = OnceLock::new();

fn default_slot() -> &'static RwLock<DefaultFormatter> {
    DEFAULT_FORMATTER.get_or_init(|| {
        RwLock::new(DefaultFormatter {
            formatter: Arc::new(MessageFormatter),
            initialised: false,
        })
    })
}

/// The current process-wide default formatter ([`MessageFormatter`] until set).
pub fn default_formatter() -> Arc<dyn Formatter> {
    Arc::clone(&default_slot().read().formatter)
}

/// Replace the process-wide default formatter.
pub fn set_default_formatter(formatter: Arc<dyn Formatter>) {
    let mut slot = default_slot().write();
    slot.formatter = formatter;
    slot.initialised = true;
}

/// Set the process-wide default formatter exactly once.
///
/// Fails with [`LoggerError::DefaultFormatterAlreadySet`] when a default was
/// already installed by this function or [`set_default_formatter`].
pub fn init_default_formatter(formatter: Arc<dyn Formatter>) -> Result<()> {
    let mut slot = default_slot().write();
    if slot.initialised {
        return Err(LoggerError::DefaultFormatterAlreadySet);
    }
    slot.formatter = formatter;
    slot.initialised = true;
    Ok(())
}

/// Restore [`MessageFormatter`] as the default and allow `init` again.
pub fn reset_default_formatter() {
    let mut slot = default_slot().write();
    slot.formatter = Arc::new(MessageFormatter);
    slot.initialised = false;
}
