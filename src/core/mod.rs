//! Core logger types and traits

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod formatter;
pub mod level;
pub mod leveled;
pub mod logger;
pub mod metrics;
pub mod record;
mod render;
pub mod timestamp;

pub use backend::{Backend, Leveled, LeveledBackend, Sink};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{FormatKind, LoggerConfig};
pub use error::{LoggerError, Result};
pub use formatter::{
    default_formatter, init_default_formatter, reset_default_formatter, set_default_formatter,
    Formatter, FormatterConfig, JsonFormatter, MessageFormatter, TextFormatter,
};
pub use level::{parse_level, Level};
pub use leveled::ModuleLeveled;
pub use logger::{Logger, LoggerBuilder, SinkErrorCallback};
pub use metrics::LoggerMetrics;
pub use record::{Arg, ArgDisplay, Record, Redactor};
pub use timestamp::TimestampFormat;
