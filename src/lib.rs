//! # Rust Leveled Logger
//!
//! A leveled logging facade that fans each record out to a set of
//! pluggable backends, each with its own severity threshold.
//!
//! ## Features
//!
//! - **Six severities**: Critical, Error, Warning, Notice, Info and Debug
//! - **Lazy records**: messages are rendered once, on first use, after redaction
//! - **Per-backend thresholds**: atomic levels that can change while logging
//! - **Lock-free fan-out**: the backend list is replaced copy-on-write
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//!
//! let errors = MemoryBackend::new();
//! let everything = MemoryBackend::new();
//! let logger = Logger::builder()
//!     .leveled_backend(ModuleLeveled::new(std::sync::Arc::new(errors.clone()), Level::Error))
//!     .backend(everything.clone())
//!     .build()?;
//!
//! logger.errorf("failed %s", args!["x"]);
//! logger.info(args!["hi"]);
//!
//! assert_eq!(errors.messages(), vec!["failed x"]);
//! assert_eq!(everything.len(), 2);
//! # Ok::<(), LoggerError>(())
//! ```

pub mod backends;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::backends::FileBackend;
    pub use crate::backends::{
        BackendFormatter, CapturedRecord, ConsoleBackend, MemoryBackend, WriterBackend,
    };
    pub use crate::core::{
        parse_level, Arg, Backend, Clock, FormatKind, Formatter, FormatterConfig, JsonFormatter,
        Level, Leveled, LeveledBackend, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, ManualClock, MessageFormatter, ModuleLeveled, Record, Redactor, Result,
        Sink, SystemClock, TextFormatter, TimestampFormat,
    };
    pub use crate::args;
}

#[cfg(feature = "file")]
pub use self::backends::FileBackend;
pub use self::backends::{BackendFormatter, CapturedRecord, ConsoleBackend, MemoryBackend, WriterBackend};
pub use self::core::{
    default_formatter, init_default_formatter, parse_level, reset_default_formatter,
    set_default_formatter, Arg, ArgDisplay, Backend, Clock, FormatKind, Formatter,
    FormatterConfig, JsonFormatter, Level, Leveled, LeveledBackend, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, ManualClock, MessageFormatter, ModuleLeveled,
    Record, Redactor, Result, Sink, SinkErrorCallback, SystemClock, TextFormatter,
    TimestampFormat,
};
