//! Backend implementations
//!
//! Every backend receives records through [`Backend::log`](crate::core::Backend::log)
//! and writes them with whatever formatter the leveled adapter attached.

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod formatted;
pub mod memory;
pub mod writer;

pub use console::ConsoleBackend;
#[cfg(feature = "file")]
pub use file::FileBackend;
pub use formatted::BackendFormatter;
pub use memory::{CapturedRecord, MemoryBackend};
pub use writer::WriterBackend;
