//! Console backend implementation

use crate::core::{Backend, Level, Record, Result};
use std::io::Write;

/// Writes formatted records to the terminal.
///
/// Pair it with a colored [`TextFormatter`](crate::core::TextFormatter) for
/// interactive output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleBackend;

impl ConsoleBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Backend for ConsoleBackend {
    fn log(&self, level: Level, call_depth: usize, record: &Record) -> Result<()> {
        let line = record.formatted(call_depth + 1)?;

        // Route Error and Critical levels to stderr, others to stdout
        match level {
            Level::Critical | Level::Error => writeln!(std::io::stderr().lock(), "{}", line)?,
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
