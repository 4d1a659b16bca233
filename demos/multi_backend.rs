//! Multiple backends example
//!
//! Sends every record to a colored console and errors only to a JSON file,
//! with a secret argument redacted before either backend sees it.
//!
//! Run with: cargo run --example multi_backend

use rust_leveled_logger::prelude::*;
use std::sync::Arc;

struct ApiKey(String);

impl Redactor for ApiKey {
    fn redacted(&self) -> Arg {
        Arg::from(format!("{}…", self.0.chars().take(4).collect::<String>()))
    }
}

fn main() -> Result<()> {
    println!("=== Rust Leveled Logger - Multiple Backends Example ===\n");

    let path = std::env::temp_dir().join("rust_leveled_logger_errors.jsonl");
    let errors = ModuleLeveled::new(Arc::new(FileBackend::new(&path)?), Level::Error)
        .with_formatter(Arc::new(JsonFormatter::default()));

    let console = BackendFormatter::new(
        ConsoleBackend::new(),
        Arc::new(TextFormatter::new(FormatterConfig::new().with_colors(true))),
    );

    let logger = Logger::builder()
        .backend(console)
        .leveled_backend(errors)
        .build()?;

    let http = logger.sub("http");
    http.infof("GET %s -> %d", args!["/health", 200]);
    http.warnf("slow request: %s took %d ms", args!["/search", 1250]);
    http.errorf(
        "upstream rejected key %s",
        args![Arg::redactable(ApiKey("sk-live-0123456789".to_string()))],
    );

    logger.flush()?;

    println!("\nLevels per backend: {:?}", logger.levels());
    println!("Metrics: {:?}", logger.metrics());
    println!("Errors written to {}", path.display());
    Ok(())
}
