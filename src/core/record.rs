//! Log record structure
//!
//! A [`Record`] is created once per log call and shared by reference with
//! every backend admitted in that call's fan-out. Its core fields never change
//! after construction. The rendered message and the formatted lines are
//! computed lazily on first read and then frozen.

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::level::Level;
use super::render;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, MutexGuard};
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

/// Types that may carry sensitive data (passwords, tokens) which must not
/// reach the log verbatim.
///
/// When a record renders its message, every redactable argument is replaced
/// by the value returned here. The replacement happens once per record.
pub trait Redactor: Send + Sync {
    fn redacted(&self) -> Arg;
}

/// A single logging argument.
pub enum Arg {
    Value(Box<dyn fmt::Display + Send + Sync>),
    Redactable(Box<dyn Redactor>),
}

impl Arg {
    pub fn value<T: fmt::Display + Send + Sync + 'static>(value: T) -> Self {
        Arg::Value(Box::new(value))
    }

    pub fn redactable<R: Redactor + 'static>(value: R) -> Self {
        Arg::Redactable(Box::new(value))
    }

    pub fn is_redactable(&self) -> bool {
        matches!(self, Arg::Redactable(_))
    }

    /// Display adapter. Redactable values that have not been replaced yet
    /// show a placeholder, never their content.
    pub fn display(&self) -> ArgDisplay<'_> {
        ArgDisplay(self)
    }
}

impl<T: fmt::Display + Send + Sync + 'static> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::value(value)
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Value(value) => f.debug_tuple("Value").field(&value.to_string()).finish(),
            Arg::Redactable(_) => f.write_str("Redactable(..)"),
        }
    }
}

pub struct ArgDisplay<'a>(&'a Arg);

impl fmt::Display for ArgDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Arg::Value(value) => fmt::Display::fmt(value, f),
            Arg::Redactable(_) => f.write_str("[REDACTED]"),
        }
    }
}

/// Lazily formatted output of one formatter instance.
type FormattedText = Arc<Mutex<Option<Arc<str>>>>;

struct FormattedSlot {
    formatter: Arc<dyn Formatter>,
    text: FormattedText,
}

struct RecordData {
    id: u64,
    time: DateTime<Utc>,
    level: Level,
    format: Option<Cow<'static, str>>,
    args: Mutex<Vec<Arg>>,
    message: OnceLock<String>,
    formatted: Mutex<Vec<FormattedSlot>>,
}

impl RecordData {
    fn formatted_slot(&self, formatter: &Arc<dyn Formatter>) -> FormattedText {
        let mut slots = self.formatted.lock();
        if let Some(slot) = slots
            .iter()
            .find(|slot| same_formatter(&slot.formatter, formatter))
        {
            return Arc::clone(&slot.text);
        }

        let text: FormattedText = Arc::new(Mutex::new(None));
        slots.push(FormattedSlot {
            formatter: Arc::clone(formatter),
            text: Arc::clone(&text),
        });
        text
    }
}

fn same_formatter(a: &Arc<dyn Formatter>, b: &Arc<dyn Formatter>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// Handle to one logging event.
///
/// Cloning is cheap and every clone shares the same id, time, arguments and
/// caches. Only the attached formatter is per handle, see
/// [`Record::with_formatter`].
#[derive(Clone)]
pub struct Record {
    data: Arc<RecordData>,
    location: Option<&'static Location<'static>>,
    formatter: Option<Arc<dyn Formatter>>,
}

impl Record {
    /// Create a record. `args` is owned by the record from here on.
    pub fn new(
        id: u64,
        time: DateTime<Utc>,
        level: Level,
        format: Option<Cow<'static, str>>,
        args: Vec<Arg>,
    ) -> Self {
        Self {
            data: Arc::new(RecordData {
                id,
                time,
                level,
                format,
                args: Mutex::new(args),
                message: OnceLock::new(),
                formatted: Mutex::new(Vec::new()),
            }),
            location: None,
            formatter: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// A handle on the same record that formats with `formatter`.
    #[must_use]
    pub fn with_formatter(&self, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            data: Arc::clone(&self.data),
            location: self.location,
            formatter: Some(formatter),
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.data.id
    }

    #[inline]
    pub fn time(&self) -> DateTime<Utc> {
        self.data.time
    }

    #[inline]
    pub fn level(&self) -> Level {
        self.data.level
    }

    pub fn format(&self) -> Option<&str> {
        self.data.format.as_deref()
    }

    /// Call site of the logging call, when known.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    pub fn formatter(&self) -> Option<&Arc<dyn Formatter>> {
        self.formatter.as_ref()
    }

    /// Lock the argument list.
    ///
    /// After [`Record::message`] has run, redactable arguments have been
    /// replaced by their redacted values. Do not call `message` while
    /// holding the guard.
    pub fn args(&self) -> MutexGuard<'_, Vec<Arg>> {
        self.data.args.lock()
    }

    /// The rendered message.
    ///
    /// The first call redacts the arguments in place and renders them, either
    /// through the record's printf-style format or by joining them with
    /// single spaces. Concurrent first calls block until one of them has
    /// finished, so redaction runs at most once.
    pub fn message(&self) -> &str {
        self.data.message.get_or_init(|| {
            let mut args = self.data.args.lock();
            for arg in args.iter_mut() {
                let redacted = match arg {
                    Arg::Redactable(redactor) => redactor.redacted(),
                    Arg::Value(_) => continue,
                };
                *arg = redacted;
            }

            match &self.data.format {
                Some(format) => render::sprintf(format, &args),
                None => render::join(&args),
            }
        })
    }

    /// The record as rendered by the attached formatter.
    ///
    /// Output is cached per formatter instance, so two backends with
    /// different formatters on the same record never see each other's text.
    /// A failed format is not cached.
    pub fn formatted(&self, call_depth: usize) -> Result<Arc<str>> {
        let formatter = self.formatter.as_ref().ok_or(LoggerError::FormatterMissing)?;
        let slot = self.data.formatted_slot(formatter);

        let mut text = slot.lock();
        if let Some(text) = text.as_ref() {
            return Ok(Arc::clone(text));
        }

        let mut buf = Vec::with_capacity(128);
        formatter
            .format(call_depth + 1, self, &mut buf)
            .map_err(|e| LoggerError::formatter(formatter.name(), e.to_string()))?;

        let rendered: Arc<str> = Arc::from(String::from_utf8_lossy(&buf).as_ref());
        *text = Some(Arc::clone(&rendered));
        Ok(rendered)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.data.id)
            .field("time", &self.data.time)
            .field("level", &self.data.level)
            .field("format", &self.data.format)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
