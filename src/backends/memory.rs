//! In-memory backend
//!
//! Keeps every record it receives. Clones share the same buffer, so a test
//! can hand one clone to a logger and inspect the other.

use crate::core::{Backend, Level, Record, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// One delivery as seen by the backend.
#[derive(Debug, Clone)]
pub struct CapturedRecord {
    pub level: Level,
    pub call_depth: usize,
    pub record: Record,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    /// Rendered messages of all captured records, in delivery order.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .iter()
            .map(|captured| captured.record.message().to_string())
            .collect()
    }

    /// Captured records rendered by the formatter each was delivered with.
    pub fn lines(&self) -> Result<Vec<String>> {
        self.records()
            .iter()
            .map(|captured| {
                captured
                    .record
                    .formatted(captured.call_depth)
                    .map(|line| line.to_string())
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Backend for MemoryBackend {
    fn log(&self, level: Level, call_depth: usize, record: &Record) -> Result<()> {
        self.records.lock().push(CapturedRecord {
            level,
            call_depth,
            record: record.clone(),
        });
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
