//! Process-wide default formatter
//!
//! Kept in its own test binary with a single test, since the default is
//! global state shared by every logger in the process.

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{
    default_formatter, init_default_formatter, reset_default_formatter, set_default_formatter,
};
use std::sync::Arc;

#[test]
fn test_default_formatter_lifecycle() {
    assert_eq!(default_formatter().name(), "message");

    // Adapters created before the default changes still resolve it lazily
    let early = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(early.clone())
        .build()
        .expect("Failed to build logger");

    init_default_formatter(Arc::new(JsonFormatter::default())).expect("First init must succeed");
    assert!(matches!(
        init_default_formatter(Arc::new(MessageFormatter)),
        Err(LoggerError::DefaultFormatterAlreadySet)
    ));
    assert_eq!(default_formatter().name(), "json");

    logger.info(args!["first"]);
    let captured = early.records();
    assert_eq!(captured[0].record.formatter().map(|f| f.name()), Some("json"));

    // The formatter is resolved once per adapter
    set_default_formatter(Arc::new(TextFormatter::default()));
    logger.info(args!["second"]);
    let captured = early.records();
    assert_eq!(captured[1].record.formatter().map(|f| f.name()), Some("json"));

    // New adapters see the replacement
    let late = MemoryBackend::new();
    Logger::builder()
        .backend(late.clone())
        .build()
        .expect("Failed to build logger")
        .info(args!["third"]);
    assert_eq!(late.records()[0].record.formatter().map(|f| f.name()), Some("text"));

    reset_default_formatter();
    assert_eq!(default_formatter().name(), "message");
    init_default_formatter(Arc::new(MessageFormatter)).expect("Init after reset must succeed");
    reset_default_formatter();
}
