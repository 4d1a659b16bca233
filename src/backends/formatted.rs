//! Per-backend formatter override

use crate::core::{Backend, Formatter, Level, Record, Result};
use std::sync::Arc;

/// Makes the wrapped backend format with its own formatter, whatever the
/// leveled adapter attached.
///
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let console = BackendFormatter::new(
///     ConsoleBackend::new(),
///     Arc::new(TextFormatter::new(FormatterConfig::new().with_colors(true))),
/// );
/// let logger = Logger::builder().backend(console).build()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct BackendFormatter {
    backend: Arc<dyn Backend>,
    formatter: Arc<dyn Formatter>,
}

impl BackendFormatter {
    pub fn new<B: Backend + 'static>(backend: B, formatter: Arc<dyn Formatter>) -> Self {
        Self {
            backend: Arc::new(backend),
            formatter,
        }
    }
}

impl Backend for BackendFormatter {
    fn log(&self, level: Level, call_depth: usize, record: &Record) -> Result<()> {
        let record = record.with_formatter(Arc::clone(&self.formatter));
        self.backend.log(level, call_depth + 1, &record)
    }

    fn flush(&self) -> Result<()> {
        self.backend.flush()
    }

    fn name(&self) -> &str {
        self.backend.name()
    }
}
