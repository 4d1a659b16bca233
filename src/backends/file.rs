//! File backend implementation

use crate::core::{Backend, Level, LoggerError, Record, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends formatted records to a file, buffered until flushed or dropped.
pub struct FileBackend {
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn log(&self, _level: Level, call_depth: usize, record: &Record) -> Result<()> {
        let line = record.formatted(call_depth + 1)?;

        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or_else(|| {
            LoggerError::backend(self.path.display().to_string(), "file writer not initialized")
        })?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(ref mut writer) = *self.writer.lock() {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
