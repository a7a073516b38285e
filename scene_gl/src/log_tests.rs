//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry, DefaultLogger formatting and the global
//! logger switch.

use crate::log::{self, Logger, LogEntry, LogSeverity, DefaultLogger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// DEFAULT LOGGER FORMAT
// ============================================================================

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "scenegl::FrameBuffer".to_string(),
        message: "Created 640x480 frame buffer".to_string(),
        file,
        line,
    }
}

#[test]
fn test_default_logger_format_without_location() {
    colored::control::set_override(false);
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Debug, None, None));
    assert!(line.contains("[DEBUG]"));
    assert!(line.contains("[scenegl::FrameBuffer]"));
    assert!(line.ends_with("Created 640x480 frame buffer"));
}

#[test]
fn test_default_logger_format_with_location() {
    colored::control::set_override(false);
    let line = DefaultLogger::format_entry(&entry(LogSeverity::Error, Some("framebuffer.rs"), Some(42)));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("(framebuffer.rs:42)"));
}

// ============================================================================
// GLOBAL LOGGER
// ============================================================================

struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn captured(entries: &Arc<Mutex<Vec<LogEntry>>>, source: &str) -> Vec<LogEntry> {
    entries
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.source == source)
        .cloned()
        .collect()
}

#[test]
#[serial]
fn test_custom_logger_receives_macro_output() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });

    crate::scenegl_info!("scenegl::log_tests::macros", "hello {}", 1);
    crate::scenegl_warn!("scenegl::log_tests::macros", "careful");
    crate::scenegl_error!("scenegl::log_tests::macros", "broken {}", "pipe");

    log::reset_logger();

    let got = captured(&entries, "scenegl::log_tests::macros");
    assert_eq!(got.len(), 3);
    assert_eq!(got[0].severity, LogSeverity::Info);
    assert_eq!(got[0].message, "hello 1");
    assert!(got[0].file.is_none());
    assert_eq!(got[2].severity, LogSeverity::Error);
    assert_eq!(got[2].message, "broken pipe");
    assert!(got[2].file.is_some());
    assert!(got[2].line.is_some());
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(CaptureLogger { entries: entries.clone() });
    log::reset_logger();

    crate::scenegl_debug!("scenegl::log_tests::reset", "not captured");

    assert!(captured(&entries, "scenegl::log_tests::reset").is_empty());
}
