//! Integration tests for logsift
//!
//! These tests run the detect → parse → filter pipeline over the fixture logs.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

use logsift::adapter::text_file::read_text_lines;
use logsift::application::use_cases::parse_logs::parse_content;
use logsift::domain::entities::log_entry::{FormatKind, LogFormat, TimestampShape, TimestampSource};
use logsift::domain::entities::search::{EntryFilter, TimeWindow};
use logsift::domain::services::entry_parser::EntryParser;
use logsift::domain::services::format_detector::FormatDetector;

/// Get the path to test fixtures
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture_lines(name: &str) -> Vec<String> {
    read_text_lines(&fixtures_path().join(name)).expect("Failed to read fixture")
}

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn test_detection_is_deterministic() {
    for name in ["u_ex240105.log", "app.log", "System.txt", "notes.txt"] {
        let lines = fixture_lines(name);
        let first = FormatDetector::detect(&lines, name);
        let second = FormatDetector::detect(&lines, name);
        assert_eq!(first, second, "{}", name);
    }
}

#[test]
fn test_fixture_formats() {
    assert_eq!(
        FormatDetector::detect(&fixture_lines("u_ex240105.log"), "u_ex240105.log"),
        LogFormat::tabular()
    );
    assert_eq!(
        FormatDetector::detect(&fixture_lines("app.log"), "app.log"),
        LogFormat::structured(Some(TimestampShape::Iso8601))
    );
    assert_eq!(
        FormatDetector::detect(&fixture_lines("System.txt"), "System"),
        LogFormat::structured(Some(TimestampShape::EventLogMarker))
    );
    assert_eq!(
        FormatDetector::detect(&fixture_lines("notes.txt"), "notes.txt").kind,
        FormatKind::Unknown
    );
}

#[test]
fn test_web_server_log_rows() {
    let parsed = parse_content(
        &fixture_lines("u_ex240105.log"),
        "u_ex240105.log",
        &EntryFilter::default(),
    );

    assert_eq!(parsed.entries.len(), 3);
    let timestamps: Vec<_> = parsed.entries.iter().map(|e| e.timestamp).collect();
    assert_eq!(timestamps, vec![at(10, 0, 0), at(10, 0, 5), at(10, 1, 0)]);
    assert!(parsed.entries.iter().all(|e| e.level == "INFO"));
}

#[test]
fn test_application_log_severities() {
    let parsed = parse_content(&fixture_lines("app.log"), "app.log", &EntryFilter::default());

    let levels: Vec<_> = parsed.entries.iter().map(|e| e.level.as_str()).collect();
    assert_eq!(levels, vec!["INFO", "WARN", "ERROR", "ERROR", "DEBUG"]);

    let disk = &parsed.entries[2];
    assert_eq!(disk.raw_lines.len(), 3);
    assert!(disk.message.contains("at storage::write"));
    assert_eq!(disk.timestamp, at(10, 0, 2));
    assert!(parsed.entries.iter().all(|e| e.source == "app.log"));
}

#[test]
fn test_event_export_records() {
    let parsed = parse_content(&fixture_lines("System.txt"), "System", &EntryFilter::default());

    assert_eq!(parsed.entries.len(), 2);
    assert_eq!(parsed.entries[0].source, "Service Control Manager");
    assert_eq!(parsed.entries[0].level, "ERROR");
    assert_eq!(parsed.entries[0].timestamp, at(14, 3, 4));
    assert_eq!(parsed.entries[1].source, "disk");
    assert_eq!(parsed.entries[1].level, "WARN");
}

#[test]
fn test_unknown_format_one_entry_per_line() {
    let now = at(12, 0, 0);
    let lines = fixture_lines("notes.txt");
    let format = FormatDetector::detect(&lines, "notes.txt");

    let entries = EntryParser::at(now).parse(&lines, &format, "notes.txt");

    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e.level == "INFO"));
    assert!(entries
        .iter()
        .all(|e| e.timestamp == now && e.timestamp_source == TimestampSource::Fallback));
}

#[test]
fn test_filter_by_term_and_window() {
    let lines = fixture_lines("app.log");

    let by_term = parse_content(
        &lines,
        "app.log",
        &EntryFilter::new(Some("TIMEOUT".to_string()), None),
    );
    assert_eq!(by_term.entries.len(), 2);

    let by_window = parse_content(
        &lines,
        "app.log",
        &EntryFilter::new(None, Some(TimeWindow::new(at(10, 0, 1), at(10, 0, 3)))),
    );
    assert_eq!(by_window.entries.len(), 3);

    let outside = parse_content(
        &lines,
        "app.log",
        &EntryFilter::new(None, Some(TimeWindow::new(at(11, 0, 0), at(12, 0, 0)))),
    );
    assert!(outside.entries.is_empty());
}
