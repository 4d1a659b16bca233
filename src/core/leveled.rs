//! Adapter granting any backend a runtime-adjustable threshold

use super::backend::{Backend, Leveled};
use super::error::Result;
use super::formatter::{default_formatter, Formatter};
use super::level::Level;
use super::record::Record;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// Wraps a plain [`Backend`] with an atomic threshold and a formatter.
///
/// The formatter is resolved on first use: the one configured with
/// [`ModuleLeveled::with_formatter`], otherwise the process-wide default.
/// Resolution runs once per adapter, even under concurrent first use.
pub struct ModuleLeveled {
    level: AtomicU8,
    backend: Arc<dyn Backend>,
    configured: Option<Arc<dyn Formatter>>,
    formatter: OnceLock<Arc<dyn Formatter>>,
}

impl ModuleLeveled {
    pub fn new(backend: Arc<dyn Backend>, level: Level) -> Self {
        Self {
            level: AtomicU8::new(level as u8),
            backend,
            configured: None,
            formatter: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.configured = Some(formatter);
        self
    }

    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    fn resolved_formatter(&self) -> &Arc<dyn Formatter> {
        self.formatter
            .get_or_init(|| self.configured.clone().unwrap_or_else(default_formatter))
    }
}

impl Leveled for ModuleLeveled {
    #[inline]
    fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    fn set_level(&self, name: &str) {
        self.level.store(Level::new(name) as u8, Ordering::Release);
    }
}

impl Backend for ModuleLeveled {
    fn log(&self, level: Level, call_depth: usize, record: &Record) -> Result<()> {
        let record = record.with_formatter(Arc::clone(self.resolved_formatter()));
        self.backend.log(level, call_depth + 1, &record)
    }

    fn flush(&self) -> Result<()> {
        self.backend.flush()
    }

    fn name(&self) -> &str {
        self.backend.name()
    }
}
