//! Basic logger usage example
//!
//! Demonstrates console logging at every severity and runtime level changes.
//!
//! Run with: cargo run --example basic_usage

use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{infof, warning};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .level("debug")
        .formatter(Arc::new(TextFormatter::new(
            FormatterConfig::new()
                .with_timestamp_format(TimestampFormat::TimeOfDay)
                .with_colors(true),
        )))
        .backend(ConsoleBackend::new())
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug(args!["This is a debug message"]);
    logger.info(args!["This is an info message"]);
    logger.notice(args!["This is a notice message"]);
    logger.warning(args!["This is a warning message"]);
    logger.error(args!["This is an error message"]);
    logger.critical(args!["This is a critical message"]);

    println!("\n2. Format strings and macros:");
    logger.errorf("failed to open %q after %d attempts", args!["config.toml", 3]);
    infof!(logger, "listening on %s:%d", "0.0.0.0", 8080);
    warning!(logger, "disk usage at", 91, "percent");

    println!("\n3. Changing the level at runtime:");
    logger.set_level("warning");
    println!("   Level set to WARNING - debug, info and notice won't show:");
    logger.debug(args!["Debug message (hidden)"]);
    logger.info(args!["Info message (hidden)"]);
    logger.warning(args!["Warning message (visible)"]);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
