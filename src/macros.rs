//! Logging macros for ergonomic argument lists.
//!
//! The logger methods take a `Vec<Arg>`; these macros build that list from
//! plain expressions so call sites read like ordinary function calls. Since
//! the macros expand in place, the recorded location is still the caller's.
//!
//! # Examples
//!
//! ```
//! use rust_leveled_logger::prelude::*;
//! use rust_leveled_logger::{info, errorf};
//!
//! let memory = MemoryBackend::new();
//! let logger = Logger::builder().backend(memory.clone()).build()?;
//!
//! info!(logger, "server started");
//! errorf!(logger, "failed %s after %d tries", "connect", 3);
//!
//! assert_eq!(memory.messages(), vec!["server started", "failed connect after 3 tries"]);
//! # Ok::<(), LoggerError>(())
//! ```

/// Build a `Vec<Arg>` from a list of displayable values.
///
/// Values that are already [`Arg`](crate::Arg)s, such as
/// [`Arg::redactable`](crate::Arg::redactable), pass through unchanged.
///
/// ```
/// use rust_leveled_logger::args;
///
/// let list = args!["user", 42, 1.5];
/// assert_eq!(list.len(), 3);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Arg::from($arg)),+]
    };
}

/// Log at an explicit level.
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().backend(MemoryBackend::new()).build()?;
/// use rust_leveled_logger::log;
/// log!(logger, Level::Notice, "cache warmed in", 12, "ms");
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $crate::args![$($arg),*])
    };
}

/// Log at an explicit level with a printf-style format.
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.logf($level, $fmt, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.critical($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! criticalf {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.criticalf($fmt, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.errorf($fmt, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.warning($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! warningf {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.warningf($fmt, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.notice($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! noticef {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.noticef($fmt, $crate::args![$($arg),*])
    };
}

/// Log an info-level message.
///
/// ```
/// # use rust_leveled_logger::prelude::*;
/// # let logger = Logger::builder().backend(MemoryBackend::new()).build()?;
/// use rust_leveled_logger::info;
/// info!(logger, "listening on port", 8080);
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.infof($fmt, $crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($crate::args![$($arg),*])
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $logger.debugf($fmt, $crate::args![$($arg),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::backends::MemoryBackend;
    use crate::core::{Arg, Level, Logger, Redactor};

    struct Secret;

    impl Redactor for Secret {
        fn redacted(&self) -> Arg {
            Arg::from("***")
        }
    }

    fn memory_logger() -> (Logger, MemoryBackend) {
        let memory = MemoryBackend::new();
        let logger = Logger::builder()
            .backend(memory.clone())
            .build()
            .expect("Failed to build logger");
        (logger, memory)
    }

    #[test]
    fn test_severity_macros() {
        let (logger, memory) = memory_logger();

        critical!(logger, "c");
        error!(logger, "e", 1);
        warning!(logger, "w");
        notice!(logger, "n");
        info!(logger, "i");
        debug!(logger);

        let levels: Vec<Level> = memory.records().iter().map(|c| c.level).collect();
        assert_eq!(
            levels,
            vec![
                Level::Critical,
                Level::Error,
                Level::Warning,
                Level::Notice,
                Level::Info,
                Level::Debug
            ]
        );
        assert_eq!(memory.messages()[1], "e 1");
        assert_eq!(memory.messages()[5], "");
    }

    #[test]
    fn test_format_macros() {
        let (logger, memory) = memory_logger();

        criticalf!(logger, "%d%%", 100);
        errorf!(logger, "failed %s", "x");
        warningf!(logger, "%s=%v", "k", "v");
        noticef!(logger, "plain");
        infof!(logger, "%.1f", 3.14159);
        debugf!(logger, "token %s", Arg::redactable(Secret));
        logf!(logger, Level::Info, "%s", "explicit");
        log!(logger, Level::Notice, "a", "b");

        assert_eq!(
            memory.messages(),
            vec![
                "100%",
                "failed x",
                "k=v",
                "plain",
                "3.1",
                "token ***",
                "explicit",
                "a b"
            ]
        );
    }
}
