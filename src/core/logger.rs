//! Main logger implementation

use super::{
    backend::{Backend, Leveled, LeveledBackend, Sink},
    clock::{Clock, SystemClock},
    config::LoggerConfig,
    error::{LoggerError, Result},
    formatter::Formatter,
    level::Level,
    metrics::LoggerMetrics,
    record::{Arg, Record},
};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Frames between a public logging method and the backend: the method itself
/// and the internal dispatch.
const BASE_CALL_DEPTH: usize = 2;

/// Out-of-band report of a failing backend: its index in the logger and the error.
pub type SinkErrorCallback = Arc<dyn Fn(usize, &LoggerError) + Send + Sync>;

type BackendList = Vec<Arc<dyn LeveledBackend>>;

struct LoggerInner {
    backends: ArcSwap<BackendList>,
    /// Serializes `set_level` so every backend ends on the same call's level.
    level_lock: Mutex<()>,
    sequence: AtomicU64,
    clock: Arc<dyn Clock>,
    extra_call_depth: usize,
    metrics: LoggerMetrics,
    on_sink_error: Option<SinkErrorCallback>,
}

/// Fans records out to leveled backends.
///
/// Cloning is cheap and clones share backends, thresholds and the sequence
/// counter. Logging never fails from the caller's point of view: backend
/// errors and panics are isolated, counted in [`LoggerMetrics`] and reported
/// out of band.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::prelude::*;
///
/// let memory = MemoryBackend::new();
/// let logger = Logger::builder()
///     .level("info")
///     .backend(memory.clone())
///     .build()?;
///
/// logger.errorf("failed %s", args!["x"]);
/// logger.debug(args!["hidden"]);
///
/// assert_eq!(memory.messages(), vec!["failed x".to_string()]);
/// # Ok::<(), LoggerError>(())
/// ```
#[derive(Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

impl Logger {
    /// Create a logger over `sinks`, wrapping plain sinks at level `level`
    /// (parsed permissively).
    pub fn new(level: &str, sinks: Vec<Sink>) -> Result<Self> {
        sinks
            .into_iter()
            .fold(Logger::builder().level(level), LoggerBuilder::sink)
            .build()
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn dispatch(
        &self,
        level: Level,
        format: Option<Cow<'static, str>>,
        args: Vec<Arg>,
        location: &'static Location<'static>,
    ) -> Record {
        let inner = &self.inner;
        let id = inner.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let record = Record::new(id, inner.clock.now(), level, format, args).with_location(location);
        inner.metrics.record_created();

        let backends = inner.backends.load_full();
        let call_depth = BASE_CALL_DEPTH + inner.extra_call_depth;
        for (idx, backend) in backends.iter().enumerate() {
            if backend.level().admits(level) {
                self.deliver(idx, backend.as_ref(), level, call_depth, &record);
            } else {
                inner.metrics.record_filtered();
            }
        }

        record
    }

    /// Hand a record to one backend with per-backend panic isolation.
    fn deliver(
        &self,
        idx: usize,
        backend: &dyn LeveledBackend,
        level: Level,
        call_depth: usize,
        record: &Record,
    ) {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            backend.log(level, call_depth, record)
        }));

        match result {
            Ok(Ok(())) => {
                self.inner.metrics.record_delivered();
            }
            Ok(Err(e)) => {
                self.inner.metrics.record_sink_failure();
                self.report(idx, &e, false);
            }
            Err(payload) => {
                self.inner.metrics.record_sink_panic();
                let e = LoggerError::backend(
                    backend.name(),
                    format!("panicked: {}", panic_message(payload.as_ref())),
                );
                self.report(idx, &e, true);
            }
        }
    }

    fn report(&self, idx: usize, error: &LoggerError, panicked: bool) {
        if let Some(ref callback) = self.inner.on_sink_error {
            callback(idx, error);
        } else if panicked {
            eprintln!(
                "[LOGGER CRITICAL] Backend #{} {}. Other backends continue to function.",
                idx, error
            );
        } else {
            eprintln!("[LOGGER ERROR] Backend #{} failed: {}", idx, error);
        }
    }

    /// Log `args` joined by spaces at `level`.
    #[track_caller]
    pub fn log(&self, level: Level, args: Vec<Arg>) {
        self.dispatch(level, None, args, Location::caller());
    }

    /// Log a printf-style `format` at `level`.
    #[track_caller]
    pub fn logf(&self, level: Level, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(level, Some(format.into()), args, Location::caller());
    }

    /// Set the threshold of every backend from a level name, parsed
    /// permissively (unknown names mean `DEBUG`).
    ///
    /// The backend list is copied, updated and swapped in as a whole. Calls
    /// are serialized, so concurrent changes never leave backends on levels
    /// from different calls.
    pub fn set_level(&self, name: &str) {
        let _guard = self.inner.level_lock.lock();
        let current = self.inner.backends.load_full();
        let updated: BackendList = current
            .iter()
            .map(|backend| {
                backend.set_level(name);
                Arc::clone(backend)
            })
            .collect();
        self.inner.backends.store(Arc::new(updated));
    }

    /// Thresholds of the current backend snapshot, in backend order.
    pub fn levels(&self) -> Vec<Level> {
        self.inner
            .backends
            .load()
            .iter()
            .map(|backend| backend.level())
            .collect()
    }

    pub fn backend_count(&self) -> usize {
        self.inner.backends.load().len()
    }

    /// Module loggers share everything with their parent.
    #[must_use]
    pub fn sub(&self, _module: &str) -> Logger {
        self.clone()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.inner.metrics
    }

    /// Flush every backend, even after one of them fails.
    ///
    /// Returns the first failure; later ones are reported like delivery
    /// failures.
    pub fn flush(&self) -> Result<()> {
        let mut first = None;
        for (idx, backend) in self.inner.backends.load_full().iter().enumerate() {
            if let Err(e) = backend.flush() {
                if first.is_none() {
                    first = Some(e);
                } else {
                    self.report(idx, &e, false);
                }
            }
        }
        first.map_or(Ok(()), Err)
    }

    fn exit(&self) -> ! {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush before exit: {}", e);
        }
        std::process::exit(1)
    }

    /// Log at `CRITICAL`, flush, then exit the process with status 1.
    #[track_caller]
    pub fn fatal(&self, args: Vec<Arg>) -> ! {
        self.dispatch(Level::Critical, None, args, Location::caller());
        self.exit()
    }

    #[track_caller]
    pub fn fatalf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) -> ! {
        self.dispatch(Level::Critical, Some(format.into()), args, Location::caller());
        self.exit()
    }

    /// Log at `CRITICAL`, then panic with the rendered (redacted) message.
    #[track_caller]
    pub fn panic(&self, args: Vec<Arg>) -> ! {
        let record = self.dispatch(Level::Critical, None, args, Location::caller());
        panic!("{}", record.message())
    }

    #[track_caller]
    pub fn panicf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) -> ! {
        let record = self.dispatch(Level::Critical, Some(format.into()), args, Location::caller());
        panic!("{}", record.message())
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, args: Vec<Arg>) {
        self.dispatch(Level::Critical, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn criticalf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Critical, Some(format.into()), args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, args: Vec<Arg>) {
        self.dispatch(Level::Error, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn errorf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Error, Some(format.into()), args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, args: Vec<Arg>) {
        self.dispatch(Level::Warning, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn warningf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Warning, Some(format.into()), args, Location::caller());
    }

    /// Alias of [`Logger::warningf`].
    #[inline]
    #[track_caller]
    pub fn warnf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Warning, Some(format.into()), args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn notice(&self, args: Vec<Arg>) {
        self.dispatch(Level::Notice, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn noticef(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Notice, Some(format.into()), args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, args: Vec<Arg>) {
        self.dispatch(Level::Info, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn infof(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Info, Some(format.into()), args, Location::caller());
    }

    /// Alias of [`Logger::infof`].
    #[inline]
    #[track_caller]
    pub fn printf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Info, Some(format.into()), args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, args: Vec<Arg>) {
        self.dispatch(Level::Debug, None, args, Location::caller());
    }

    #[inline]
    #[track_caller]
    pub fn debugf(&self, format: impl Into<Cow<'static, str>>, args: Vec<Arg>) {
        self.dispatch(Level::Debug, Some(format.into()), args, Location::caller());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("levels", &self.levels())
            .field("sequence", &self.inner.sequence.load(Ordering::Relaxed))
            .field("extra_call_depth", &self.inner.extra_call_depth)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_leveled_logger::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder()
///     .level("warning")
///     .backend(MemoryBackend::new())
///     .formatter(Arc::new(TextFormatter::default()))
///     .on_sink_error(Arc::new(|idx: usize, err: &LoggerError| {
///         eprintln!("backend {} failed: {}", idx, err);
///     }))
///     .build()?;
/// # Ok::<(), LoggerError>(())
/// ```
pub struct LoggerBuilder {
    level: String,
    sinks: Vec<Sink>,
    formatter: Option<Arc<dyn Formatter>>,
    clock: Arc<dyn Clock>,
    extra_call_depth: usize,
    on_sink_error: Option<SinkErrorCallback>,
}

impl LoggerBuilder {
    /// Create a new builder: level `DEBUG`, wall clock, no backends
    pub fn new() -> Self {
        Self {
            level: Level::Debug.as_str().to_string(),
            sinks: Vec::new(),
            formatter: None,
            clock: Arc::new(SystemClock),
            extra_call_depth: 0,
            on_sink_error: None,
        }
    }

    /// Start from validated external configuration.
    ///
    /// The level name is checked strictly here, unlike [`LoggerBuilder::level`].
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let level = config.validate()?;
        Ok(Self::new()
            .level(level.as_str())
            .extra_call_depth(config.extra_call_depth)
            .formatter(config.formatter()))
    }

    /// Default level for plain backends, parsed permissively
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, name: impl Into<String>) -> Self {
        self.level = name.into();
        self
    }

    /// Add a plain backend; it gets wrapped with a leveled adapter
    #[must_use = "builder methods return a new value"]
    pub fn backend<B: Backend + 'static>(self, backend: B) -> Self {
        self.sink(Sink::plain(backend))
    }

    /// Add a backend that manages its own level; it is used as is
    #[must_use = "builder methods return a new value"]
    pub fn leveled_backend<B: LeveledBackend + 'static>(self, backend: B) -> Self {
        self.sink(Sink::leveled(backend))
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Sink) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Formatter for wrapped plain backends instead of the process default
    #[must_use = "builder methods return a new value"]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Time source for record timestamps
    #[must_use = "builder methods return a new value"]
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Extra layers to account for when this logger is itself wrapped
    #[must_use = "builder methods return a new value"]
    pub fn extra_call_depth(mut self, depth: usize) -> Self {
        self.extra_call_depth = depth;
        self
    }

    /// Receive backend failures instead of having them printed to stderr
    #[must_use = "builder methods return a new value"]
    pub fn on_sink_error(mut self, callback: SinkErrorCallback) -> Self {
        self.on_sink_error = Some(callback);
        self
    }

    /// Build the Logger
    ///
    /// Fails with [`LoggerError::NoBackends`] when no backend was added.
    pub fn build(self) -> Result<Logger> {
        if self.sinks.is_empty() {
            return Err(LoggerError::NoBackends);
        }

        let level = Level::new(&self.level);
        let formatter = self.formatter;
        let backends: BackendList = self
            .sinks
            .into_iter()
            .map(|sink| {
                sink.into_leveled(level, |adapter| match formatter {
                    Some(ref formatter) => adapter.with_formatter(Arc::clone(formatter)),
                    None => adapter,
                })
            })
            .collect();

        Ok(Logger {
            inner: Arc::new(LoggerInner {
                backends: ArcSwap::from_pointee(backends),
                level_lock: Mutex::new(()),
                sequence: AtomicU64::new(0),
                clock: self.clock,
                extra_call_depth: self.extra_call_depth,
                metrics: LoggerMetrics::new(),
                on_sink_error: self.on_sink_error,
            }),
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
