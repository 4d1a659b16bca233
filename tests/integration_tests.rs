//! Integration tests for the leveled logger
//!
//! These tests verify:
//! - Sequence numbering and format rendering end to end
//! - Per-backend thresholds and runtime level changes
//! - Per-backend formatters over a shared record
//! - Backend failure isolation
//! - File and writer output
//! - Configuration-driven construction

use parking_lot::Mutex;
use rust_leveled_logger::prelude::*;
use rust_leveled_logger::{info, warningf};
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

/// Write target whose contents stay readable after the backend takes it.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("Buffer is not UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingBackend;

impl Backend for FailingBackend {
    fn log(&self, _level: Level, _call_depth: usize, _record: &Record) -> Result<()> {
        Err(LoggerError::backend("failing", "disk full"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct PanickingBackend;

impl Backend for PanickingBackend {
    fn log(&self, _level: Level, _call_depth: usize, _record: &Record) -> Result<()> {
        panic!("backend exploded")
    }
}

fn leveled(memory: &MemoryBackend, level: Level) -> ModuleLeveled {
    ModuleLeveled::new(Arc::new(memory.clone()), level)
}

#[test]
fn test_first_record_is_numbered_and_rendered() {
    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    logger.errorf("failed %s", args!["x"]);

    let captured = memory.records();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].level, Level::Error);
    assert_eq!(captured[0].record.id(), 1);
    assert_eq!(captured[0].record.level(), Level::Error);
    assert_eq!(captured[0].record.format(), Some("failed %s"));
    assert_eq!(captured[0].record.message(), "failed x");
}

#[test]
fn test_each_backend_applies_its_own_threshold() {
    let errors = MemoryBackend::new();
    let everything = MemoryBackend::new();
    let logger = Logger::new(
        "debug",
        vec![
            Sink::leveled(leveled(&errors, Level::Error)),
            Sink::plain(everything.clone()),
        ],
    )
    .expect("Failed to build logger");

    logger.info(args!["hi"]);

    assert!(errors.is_empty());
    assert_eq!(everything.messages(), vec!["hi"]);
}

#[test]
fn test_warning_threshold_filters_lower_severities() {
    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .level("WARNING")
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    logger.debug(args!["d"]);
    logger.info(args!["i"]);
    logger.notice(args!["n"]);
    logger.warning(args!["w"]);
    logger.error(args!["e"]);
    logger.critical(args!["c"]);

    assert_eq!(memory.messages(), vec!["w", "e", "c"]);
    assert_eq!(logger.metrics().filtered(), 3);
    assert_eq!(logger.metrics().delivered(), 3);
    // Filtered records still consume sequence numbers
    let ids: Vec<u64> = memory.records().iter().map(|c| c.record.id()).collect();
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn test_set_level_applies_to_all_backends() {
    let first = MemoryBackend::new();
    let second = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(first.clone())
        .leveled_backend(leveled(&second, Level::Critical))
        .build()
        .expect("Failed to build logger");

    logger.set_level("error");
    assert_eq!(logger.levels(), vec![Level::Error, Level::Error]);

    logger.warning(args!["dropped"]);
    logger.error(args!["kept"]);
    assert_eq!(first.messages(), vec!["kept"]);
    assert_eq!(second.messages(), vec!["kept"]);

    // Unknown names fall back to DEBUG
    logger.set_level("verbose");
    assert_eq!(logger.levels(), vec![Level::Debug, Level::Debug]);
}

#[test]
fn test_backends_format_shared_record_independently() {
    let plain = MemoryBackend::new();
    let json = MemoryBackend::new();
    let logger = Logger::builder()
        .leveled_backend(leveled(&plain, Level::Debug).with_formatter(Arc::new(MessageFormatter)))
        .leveled_backend(
            leveled(&json, Level::Debug)
                .with_formatter(Arc::new(JsonFormatter::new(TimestampFormat::UnixMillis))),
        )
        .build()
        .expect("Failed to build logger");

    logger.infof("user %s logged in", args!["alice"]);

    let plain_lines = plain.lines().expect("Plain backend has no formatter");
    assert_eq!(plain_lines, vec!["user alice logged in"]);

    let json_lines = json.lines().expect("JSON backend has no formatter");
    let parsed: serde_json::Value =
        serde_json::from_str(&json_lines[0]).expect("Output is not valid JSON");
    assert_eq!(parsed["id"], 1);
    assert_eq!(parsed["level"], "INFO");
    assert_eq!(parsed["message"], "user alice logged in");
    assert!(parsed["file"].as_str().unwrap().ends_with("integration_tests.rs"));

    // Both backends were handed the same underlying record
    let plain_records = plain.records();
    let json_records = json.records();
    let (a, b) = (&plain_records[0].record, &json_records[0].record);
    assert_eq!(a.id(), b.id());
    assert!(!Arc::ptr_eq(a.formatter().unwrap(), b.formatter().unwrap()));
}

#[test]
fn test_backend_formatter_overrides_logger_formatter() {
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .formatter(Arc::new(JsonFormatter::default()))
        .backend(BackendFormatter::new(
            WriterBackend::new(buffer.clone()),
            Arc::new(MessageFormatter),
        ))
        .build()
        .expect("Failed to build logger");

    logger.notice(args!["plain", "text"]);
    logger.flush().expect("Flush failed");

    assert_eq!(buffer.contents(), "plain text\n");
}

#[test]
fn test_call_depth_grows_with_each_layer() {
    let direct = MemoryBackend::new();
    let wrapped = MemoryBackend::new();
    let logger = Logger::builder()
        .extra_call_depth(1)
        .backend(direct.clone())
        .backend(BackendFormatter::new(wrapped.clone(), Arc::new(MessageFormatter)))
        .build()
        .expect("Failed to build logger");

    logger.info(args!["depth"]);

    // base 2, extra 1, leveled adapter 1
    assert_eq!(direct.records()[0].call_depth, 4);
    // plus the formatter override
    assert_eq!(wrapped.records()[0].call_depth, 5);
}

#[test]
fn test_record_carries_caller_location() {
    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    let line = line!() + 1;
    logger.warning(args!["here"]);

    let location = memory.records()[0]
        .record
        .location()
        .expect("Record has no location");
    assert!(location.file().ends_with("integration_tests.rs"));
    assert_eq!(location.line(), line);
}

#[test]
fn test_failing_backend_does_not_block_others() {
    let memory = MemoryBackend::new();
    let failures = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&failures);
    let logger = Logger::builder()
        .backend(FailingBackend)
        .backend(PanickingBackend)
        .backend(memory.clone())
        .on_sink_error(Arc::new(move |idx: usize, err: &LoggerError| {
            seen.lock().push((idx, err.to_string()));
        }))
        .build()
        .expect("Failed to build logger");

    logger.error(args!["still delivered"]);

    assert_eq!(memory.messages(), vec!["still delivered"]);
    let failures = failures.lock();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].0, 0);
    assert!(failures[0].1.contains("disk full"));
    assert_eq!(failures[1].0, 1);
    assert!(failures[1].1.contains("backend exploded"));
    assert_eq!(logger.metrics().sink_failures(), 1);
    assert_eq!(logger.metrics().sink_panics(), 1);
    assert_eq!(logger.metrics().delivered(), 1);
}

#[test]
fn test_explicit_adapter_reports_failure_index() {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&failures);
    let buffer = SharedBuffer::default();
    let logger = Logger::builder()
        .leveled_backend(ModuleLeveled::new(
            Arc::new(BackendFormatter::new(
                WriterBackend::new(buffer.clone()),
                Arc::new(MessageFormatter),
            )),
            Level::Debug,
        ))
        .backend(FailingBackend)
        .on_sink_error(Arc::new(move |idx: usize, _err: &LoggerError| seen.lock().push(idx)))
        .build()
        .expect("Failed to build logger");

    logger.info(args!["ok"]);

    assert_eq!(buffer.contents(), "ok\n");
    assert_eq!(*failures.lock(), vec![1]);
}

#[test]
fn test_redacted_arguments_reach_every_backend() {
    struct Password(&'static str);

    impl Redactor for Password {
        fn redacted(&self) -> Arg {
            Arg::from(format!("{}***", &self.0[..1]))
        }
    }

    let first = MemoryBackend::new();
    let second = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(first.clone())
        .backend(second.clone())
        .build()
        .expect("Failed to build logger");

    logger.infof("login %s with %s", args!["bob", Arg::redactable(Password("hunter2"))]);

    assert_eq!(first.messages(), vec!["login bob with h***"]);
    assert_eq!(second.messages(), vec!["login bob with h***"]);
}

#[test]
fn test_file_backend_text_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("app.log");

    let logger = Logger::builder()
        .formatter(Arc::new(TextFormatter::new(
            FormatterConfig::new()
                .with_timestamp_format(TimestampFormat::TimeOfDay)
                .with_include_sequence(true),
        )))
        .backend(FileBackend::new(&path).expect("Failed to create file backend"))
        .build()
        .expect("Failed to build logger");

    warningf!(logger, "disk %d%% full", 91);
    info!(logger, "second", "line");
    logger.flush().expect("Flush failed");

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(" #1 integration_tests.rs:"));
    assert!(lines[0].ends_with("▶ WARN disk 91% full"));
    assert!(lines[1].contains(" #2 "));
    assert!(lines[1].ends_with("▶ INFO second line"));
}

#[test]
fn test_clock_is_injectable() {
    let start = chrono::DateTime::parse_from_rfc3339("2025-01-08T10:30:45Z")
        .expect("Invalid timestamp")
        .with_timezone(&chrono::Utc);
    let clock = Arc::new(ManualClock::new(start));
    let source = Arc::clone(&clock);
    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .clock(move || source.now())
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    logger.info(args!["first"]);
    clock.advance(chrono::Duration::seconds(5));
    logger.info(args!["second"]);

    let times: Vec<_> = memory.records().iter().map(|c| c.record.time()).collect();
    assert_eq!(times, vec![start, start + chrono::Duration::seconds(5)]);
}

#[test]
fn test_sub_logger_shares_sequence_and_levels() {
    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");
    let db = logger.sub("db");

    logger.info(args!["parent"]);
    db.info(args!["child"]);
    db.set_level("critical");
    logger.error(args!["filtered"]);

    let ids: Vec<u64> = memory.records().iter().map(|c| c.record.id()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(logger.levels(), vec![Level::Critical]);
}

#[test]
fn test_logger_from_config() {
    let config: LoggerConfig =
        serde_json::from_str(r#"{"level": "notice", "format": "json", "extra_call_depth": 2}"#)
            .expect("Invalid config");
    let memory = MemoryBackend::new();
    let logger = LoggerBuilder::from_config(&config)
        .expect("Config rejected")
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    logger.info(args!["filtered"]);
    logger.notice(args!["kept"]);

    let captured = memory.records();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].call_depth, 5);
    let line = captured[0]
        .record
        .formatted(captured[0].call_depth)
        .expect("No formatter attached");
    assert!(line.contains(r#""message":"kept""#));

    let bad: LoggerConfig = serde_json::from_str(r#"{"level": "loud"}"#).expect("Invalid config");
    assert!(matches!(
        LoggerBuilder::from_config(&bad),
        Err(LoggerError::InvalidLevel { .. })
    ));
}

#[test]
fn test_logger_requires_a_backend() {
    let result = Logger::new("info", Vec::new());
    assert!(matches!(result, Err(LoggerError::NoBackends)));
    assert_eq!(
        LoggerError::NoBackends.to_string(),
        "Logger requires at least one backend"
    );
}

#[test]
fn test_panic_carries_redacted_message() {
    struct Token;

    impl Redactor for Token {
        fn redacted(&self) -> Arg {
            Arg::from("<token>")
        }
    }

    let memory = MemoryBackend::new();
    let logger = Logger::builder()
        .backend(memory.clone())
        .build()
        .expect("Failed to build logger");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic(args!["bad", Arg::redactable(Token)]);
    }));

    let payload = result.expect_err("Logger::panic must unwind");
    let message = payload
        .downcast_ref::<String>()
        .expect("Panic payload is not a String");
    assert_eq!(message, "bad <token>");
    assert_eq!(memory.records()[0].level, Level::Critical);
}
