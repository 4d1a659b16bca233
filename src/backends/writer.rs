//! Backend over any `io::Write`

use crate::core::{Backend, Level, Record, Result};
use parking_lot::Mutex;
use std::io::Write;

/// Writes each formatted record followed by a newline.
pub struct WriterBackend<W: Write + Send> {
    writer: Mutex<W>,
    name: String,
}

impl<W: Write + Send> WriterBackend<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            name: "writer".to_string(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> Backend for WriterBackend<W> {
    fn log(&self, _level: Level, call_depth: usize, record: &Record) -> Result<()> {
        let line = record.formatted(call_depth + 1)?;
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
