//! # Extractors
//!
//! タイムスタンプ形・重大度トークンの判定と抽出
//!
//! 判定・抽出はいずれも「先に一致したものが勝つ」順序付きリストで行う。
//! リストの順序は互換性のため固定。

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::domain::entities::log_entry::TimestampShape;

/// 認識する重大度トークン
pub const SEVERITY_TOKENS: [&str; 8] = [
    "ERROR", "WARN", "INFO", "DEBUG", "FATAL", "TRACE", "CRITICAL", "SEVERE",
];

/// 重大度が見つからない場合の既定値
pub const DEFAULT_LEVEL: &str = "INFO";

/// イベントログのテキストエクスポートのレコード開始マーカー
pub const EVENT_LOG_MARKER: &str = "Log Name:";

/// 表形式のフィールドヘッダ
pub const TABULAR_FIELDS_MARKER: &str = "#Fields:";

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| unreachable!())
}

static ISO8601_START: Lazy<Regex> = Lazy::new(|| compile(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}"));
static COMMA_FRACTION_START: Lazy<Regex> =
    Lazy::new(|| compile(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}"));
static BRACKETED_TIME_START: Lazy<Regex> = Lazy::new(|| compile(r"^\[\d{2}:\d{2}:\d{2}\]"));

static ISO8601_ANY: Lazy<Regex> =
    Lazy::new(|| compile(r"(\d{4}-\d{2}-\d{2})T(\d{2}:\d{2}:\d{2})(?:\.(\d{1,9}))?"));
static COMMA_FRACTION_ANY: Lazy<Regex> =
    Lazy::new(|| compile(r"(\d{4}-\d{2}-\d{2}) (\d{2}:\d{2}:\d{2})(?:,(\d{1,9}))?"));
static EVENT_EXPORT_DATE_ANY: Lazy<Regex> =
    Lazy::new(|| compile(r"(\d{1,2}/\d{1,2}/\d{4}) (\d{1,2}:\d{2}:\d{2})(?: ?([AaPp][Mm]))?"));
static BRACKETED_TIME_ANY: Lazy<Regex> = Lazy::new(|| compile(r"\[(\d{2}:\d{2}:\d{2})\]"));

static SEVERITY_ANY: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\b(ERROR|WARN(?:ING)?|INFO(?:RMATION)?|DEBUG|FATAL|TRACE|CRITICAL|SEVERE)\b")
});
static SEVERITY_LEADING: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)^\s*\[?(ERROR|WARN(?:ING)?|INFO(?:RMATION)?|DEBUG|FATAL|TRACE|CRITICAL|SEVERE)\b")
});

/// 検出器が試すタイムスタンプ形（この順序で判定）
pub const DETECTION_SHAPES: [TimestampShape; 4] = [
    TimestampShape::Iso8601,
    TimestampShape::CommaFraction,
    TimestampShape::EventLogMarker,
    TimestampShape::BracketedTime,
];

/// 行がその形のエントリ開始行かどうか
pub fn line_starts_with_shape(line: &str, shape: TimestampShape) -> bool {
    match shape {
        TimestampShape::Iso8601 => ISO8601_START.is_match(line),
        TimestampShape::CommaFraction => COMMA_FRACTION_START.is_match(line),
        TimestampShape::EventLogMarker => line.trim_start().starts_with(EVENT_LOG_MARKER),
        TimestampShape::BracketedTime => BRACKETED_TIME_START.is_match(line),
        TimestampShape::TabularDateTime => false,
    }
}

/// 行が重大度トークンで始まるか
pub fn line_starts_with_severity(line: &str) -> bool {
    SEVERITY_LEADING.is_match(line)
}

/// テキストに重大度トークンが含まれるか
pub fn contains_severity(text: &str) -> bool {
    SEVERITY_ANY.is_match(text)
}

/// テキスト中で最初に現れる重大度トークン（正規化済み）を返す
pub fn extract_level(text: &str) -> String {
    SEVERITY_ANY
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| normalize_level(m.as_str()))
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

fn normalize_level(token: &str) -> String {
    let upper = token.to_uppercase();
    match upper.as_str() {
        "WARNING" => "WARN".to_string(),
        "INFORMATION" => "INFO".to_string(),
        _ => upper,
    }
}

/// タイムスタンプ抽出器
struct TimestampExtractor {
    regex: &'static Lazy<Regex>,
    parse: fn(&Captures, NaiveDate) -> Option<NaiveDateTime>,
}

/// 抽出器の順序付きリスト（先に一致したものを解析する）
static TIMESTAMP_EXTRACTORS: [TimestampExtractor; 4] = [
    TimestampExtractor {
        regex: &ISO8601_ANY,
        parse: parse_date_time_fraction,
    },
    TimestampExtractor {
        regex: &COMMA_FRACTION_ANY,
        parse: parse_date_time_fraction,
    },
    TimestampExtractor {
        regex: &EVENT_EXPORT_DATE_ANY,
        parse: parse_event_export_date,
    },
    TimestampExtractor {
        regex: &BRACKETED_TIME_ANY,
        parse: parse_bracketed_time,
    },
];

/// テキストからタイムスタンプを抽出する
///
/// 最初に一致した抽出器の結果を返す。一致しない、または解析に失敗した場合は `None`
///
/// # Arguments
///
/// * `text` - 対象テキスト
/// * `today` - 日付を含まない形（`[HH:mm:ss]`）に補う日付
pub fn extract_timestamp(text: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    for extractor in TIMESTAMP_EXTRACTORS.iter() {
        if let Some(caps) = extractor.regex.captures(text) {
            return (extractor.parse)(&caps, today);
        }
    }
    None
}

/// 表形式の `date` と `time` フィールドを合成して解析する
pub fn parse_tabular_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M:%S").ok()
}

fn parse_date_time_fraction(caps: &Captures, _today: NaiveDate) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(caps.get(2)?.as_str(), "%H:%M:%S").ok()?;
    let timestamp = date.and_time(time);

    match caps.get(3) {
        Some(fraction) => with_fraction(timestamp, fraction.as_str()),
        None => Some(timestamp),
    }
}

fn parse_event_export_date(caps: &Captures, _today: NaiveDate) -> Option<NaiveDateTime> {
    let date = caps.get(1)?.as_str();
    let time = caps.get(2)?.as_str();

    match caps.get(3) {
        Some(meridiem) => NaiveDateTime::parse_from_str(
            &format!("{} {} {}", date, time, meridiem.as_str().to_uppercase()),
            "%m/%d/%Y %I:%M:%S %p",
        )
        .ok(),
        None => NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%m/%d/%Y %H:%M:%S")
            .ok(),
    }
}

fn parse_bracketed_time(caps: &Captures, today: NaiveDate) -> Option<NaiveDateTime> {
    let time = NaiveTime::parse_from_str(caps.get(1)?.as_str(), "%H:%M:%S").ok()?;
    Some(today.and_time(time))
}

fn with_fraction(timestamp: NaiveDateTime, digits: &str) -> Option<NaiveDateTime> {
    let nanos: u32 = format!("{:0<9}", digits).parse().ok()?;
    timestamp.with_nanosecond(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_line_starts_with_shape() {
        assert!(line_starts_with_shape(
            "2024-01-05T10:00:00Z started",
            TimestampShape::Iso8601
        ));
        assert!(!line_starts_with_shape(
            "2024-01-05 10:00:00 started",
            TimestampShape::Iso8601
        ));
        assert!(line_starts_with_shape(
            "2024-01-05 10:00:00,123 started",
            TimestampShape::CommaFraction
        ));
        assert!(line_starts_with_shape(
            "2024-01-05 10:00:00 started",
            TimestampShape::CommaFraction
        ));
        assert!(line_starts_with_shape(
            "Log Name:      System",
            TimestampShape::EventLogMarker
        ));
        assert!(line_starts_with_shape(
            "[10:00:00] started",
            TimestampShape::BracketedTime
        ));
    }

    #[test]
    fn test_extract_level_first_occurrence_wins() {
        assert_eq!(extract_level("WARN before ERROR"), "WARN");
        assert_eq!(extract_level("something ERROR then WARN"), "ERROR");
    }

    #[test]
    fn test_extract_level_normalizes_tokens() {
        assert_eq!(extract_level("Level: Warning"), "WARN");
        assert_eq!(extract_level("Level: Information"), "INFO");
        assert_eq!(extract_level("[critical] boom"), "CRITICAL");
    }

    #[test]
    fn test_every_severity_token_is_recognized() {
        for token in SEVERITY_TOKENS {
            let line = format!("{} something happened", token.to_lowercase());
            assert!(contains_severity(&line), "{}", token);
            assert!(line_starts_with_severity(&line), "{}", token);
            assert_eq!(extract_level(&line), token);
        }
    }

    #[test]
    fn test_extract_level_default() {
        assert_eq!(extract_level("no severity words here"), "INFO");
        // 単語の一部は対象外
        assert_eq!(extract_level("3 errors found while debugging"), "INFO");
    }

    #[test]
    fn test_extract_timestamp_iso_with_fraction() {
        let ts = extract_timestamp("2024-01-05T10:20:30.5 job done", today()).unwrap();
        assert_eq!(ts, datetime(2024, 1, 5, 10, 20, 30).with_nanosecond(500_000_000).unwrap());
    }

    #[test]
    fn test_extract_timestamp_comma_fraction() {
        let ts = extract_timestamp("2024-01-05 10:20:30,123 job done", today()).unwrap();
        assert_eq!(ts, datetime(2024, 1, 5, 10, 20, 30).with_nanosecond(123_000_000).unwrap());
    }

    #[test]
    fn test_extract_timestamp_event_export_date() {
        let ts = extract_timestamp("Date:          1/5/2024 2:03:04 PM", today()).unwrap();
        assert_eq!(ts, datetime(2024, 1, 5, 14, 3, 4));
    }

    #[test]
    fn test_extract_timestamp_bracketed_uses_today() {
        let ts = extract_timestamp("[08:15:00] tick", today()).unwrap();
        assert_eq!(ts, datetime(2024, 3, 1, 8, 15, 0));
    }

    #[test]
    fn test_extract_timestamp_order_iso_before_bracketed() {
        let ts = extract_timestamp("[08:15:00] at 2024-01-05T10:00:00", today()).unwrap();
        assert_eq!(ts, datetime(2024, 1, 5, 10, 0, 0));
    }

    #[test]
    fn test_extract_timestamp_invalid_date_is_none() {
        assert!(extract_timestamp("2024-13-45T10:00:00 broken", today()).is_none());
        assert!(extract_timestamp("nothing", today()).is_none());
    }

    #[test]
    fn test_parse_tabular_date_time() {
        assert_eq!(
            parse_tabular_date_time("2024-01-05", "10:00:01"),
            Some(datetime(2024, 1, 5, 10, 0, 1))
        );
        assert!(parse_tabular_date_time("bad", "10:00:01").is_none());
    }
}
