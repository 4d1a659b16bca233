//! Backend traits for log output destinations

use super::error::Result;
use super::leveled::ModuleLeveled;
use super::level::Level;
use super::record::Record;
use std::sync::Arc;

/// A log sink.
///
/// `call_depth` is the number of wrapping layers between the logging call
/// and this backend. Every layer that forwards a record adds exactly one.
pub trait Backend: Send + Sync {
    fn log(&self, level: Level, call_depth: usize, record: &Record) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "backend"
    }
}

/// A backend whose threshold can be read and changed at runtime.
pub trait Leveled {
    fn level(&self) -> Level;

    /// Set the threshold from a level name, parsed permissively.
    fn set_level(&self, name: &str);
}

pub trait LeveledBackend: Backend + Leveled {}

impl<T: Backend + Leveled + ?Sized> LeveledBackend for T {}

/// A backend handed to a logger, tagged with its capabilities.
///
/// `Leveled` sinks are used as they are. `Plain` sinks are wrapped in a
/// [`ModuleLeveled`] adapter at the logger's default level.
#[derive(Clone)]
pub enum Sink {
    Plain(Arc<dyn Backend>),
    Leveled(Arc<dyn LeveledBackend>),
}

impl Sink {
    pub fn plain<B: Backend + 'static>(backend: B) -> Self {
        Sink::Plain(Arc::new(backend))
    }

    pub fn leveled<B: LeveledBackend + 'static>(backend: B) -> Self {
        Sink::Leveled(Arc::new(backend))
    }

    pub fn is_leveled(&self) -> bool {
        matches!(self, Sink::Leveled(_))
    }

    pub(crate) fn into_leveled(
        self,
        default_level: Level,
        adapter: impl FnOnce(ModuleLeveled) -> ModuleLeveled,
    ) -> Arc<dyn LeveledBackend> {
        match self {
            Sink::Leveled(backend) => backend,
            Sink::Plain(backend) => Arc::new(adapter(ModuleLeveled::new(backend, default_level))),
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sink::Plain(backend) => f.debug_tuple("Plain").field(&backend.name()).finish(),
            Sink::Leveled(backend) => f
                .debug_tuple("Leveled")
                .field(&backend.name())
                .field(&backend.level())
                .finish(),
        }
    }
}
