//! # Entry Parsing Service
//!
//! 検出された形式に従って生の行を正規化エントリに変換するサービス

use chrono::{Local, NaiveDateTime};

use crate::domain::entities::log_entry::{
    FormatKind, LogEntry, LogFormat, TimestampShape, TimestampSource,
};
use crate::domain::services::extractors::{
    extract_level, extract_timestamp, line_starts_with_severity, line_starts_with_shape,
    parse_tabular_date_time, DEFAULT_LEVEL, DETECTION_SHAPES, EVENT_LOG_MARKER,
    TABULAR_FIELDS_MARKER,
};

/// 構造化ログの複数行エントリを組み立てる状態
enum ParseState {
    /// 最初の行を待っている
    Idle,
    /// エントリの行を蓄積中
    Accumulating(Vec<String>),
}

/// エントリパーサー
///
/// タイムスタンプが得られない場合は `now` で代用し、
/// [`TimestampSource::Fallback`] を付ける
pub struct EntryParser {
    now: NaiveDateTime,
}

impl EntryParser {
    /// 現在時刻を代用値とするパーサーを作成
    pub fn new() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// 指定時刻を代用値とするパーサーを作成
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// 生の行をエントリに変換する
    ///
    /// # Arguments
    ///
    /// * `lines` - ログ全体の生の行
    /// * `format` - 検出された形式
    /// * `source` - エントリの既定のソース名（通常はファイルの表示名）
    ///
    /// # Returns
    ///
    /// ソースに現れた順のエントリ（時系列順とは限らない）
    pub fn parse<S: AsRef<str>>(&self, lines: &[S], format: &LogFormat, source: &str) -> Vec<LogEntry> {
        match format.kind {
            FormatKind::Tabular => self.parse_tabular(lines, source),
            FormatKind::Structured => self.parse_structured(lines, format.timestamp_shape, source),
            FormatKind::Unknown => self.parse_unknown(lines, source),
        }
    }

    fn parse_tabular<S: AsRef<str>>(&self, lines: &[S], source: &str) -> Vec<LogEntry> {
        let fields: Vec<String> = lines
            .iter()
            .find_map(|line| line.as_ref().trim_start().strip_prefix(TABULAR_FIELDS_MARKER))
            .map(|rest| rest.split_whitespace().map(|f| f.to_string()).collect())
            .unwrap_or_default();

        let date_index = fields.iter().position(|f| f.eq_ignore_ascii_case("date"));
        let time_index = fields.iter().position(|f| f.eq_ignore_ascii_case("time"));

        let mut entries = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let values: Vec<&str> = line.split(' ').collect();
            let parsed = match (date_index, time_index) {
                (Some(d), Some(t)) => match (values.get(d), values.get(t)) {
                    (Some(date), Some(time)) => parse_tabular_date_time(date, time),
                    _ => None,
                },
                _ => None,
            };

            let (timestamp, timestamp_source) = self.resolve(parsed);
            entries.push(LogEntry {
                timestamp,
                timestamp_source,
                level: DEFAULT_LEVEL.to_string(),
                source: source.to_string(),
                message: line.to_string(),
                raw_lines: vec![line.to_string()],
            });
        }

        entries
    }

    fn parse_structured<S: AsRef<str>>(
        &self,
        lines: &[S],
        shape: Option<TimestampShape>,
        source: &str,
    ) -> Vec<LogEntry> {
        let mut entries = Vec::new();
        let mut state = ParseState::Idle;

        for line in lines {
            let line = line.as_ref();

            state = match state {
                // 最初のエントリより前の空行は捨てる
                ParseState::Idle if line.trim().is_empty() => ParseState::Idle,
                ParseState::Idle => ParseState::Accumulating(vec![line.to_string()]),
                ParseState::Accumulating(block) if is_entry_start(line, shape) => {
                    entries.push(self.build_structured_entry(block, source));
                    ParseState::Accumulating(vec![line.to_string()])
                }
                ParseState::Accumulating(mut block) => {
                    block.push(line.to_string());
                    ParseState::Accumulating(block)
                }
            };
        }

        // 最後のマーカー以降の行もエントリとして出力する
        if let ParseState::Accumulating(block) = state {
            entries.push(self.build_structured_entry(block, source));
        }

        entries
    }

    fn build_structured_entry(&self, block: Vec<String>, default_source: &str) -> LogEntry {
        // 空行はブロック内では保持し、末尾の区切りだけ message から除く
        let content_len = block
            .iter()
            .rposition(|line| !line.trim().is_empty())
            .map_or(0, |i| i + 1);
        let message = block[..content_len].join("\n");
        let level = extract_level(&message);
        let (timestamp, timestamp_source) =
            self.resolve(extract_timestamp(&message, self.now.date()));

        let source = if block
            .first()
            .is_some_and(|first| first.trim_start().starts_with(EVENT_LOG_MARKER))
        {
            event_block_source(&block).unwrap_or_else(|| default_source.to_string())
        } else {
            default_source.to_string()
        };

        LogEntry {
            timestamp,
            timestamp_source,
            level,
            source,
            message,
            raw_lines: block,
        }
    }

    fn parse_unknown<S: AsRef<str>>(&self, lines: &[S], source: &str) -> Vec<LogEntry> {
        lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !line.trim().is_empty())
            .map(|line| LogEntry {
                timestamp: self.now,
                timestamp_source: TimestampSource::Fallback,
                level: DEFAULT_LEVEL.to_string(),
                source: source.to_string(),
                message: line.to_string(),
                raw_lines: vec![line.to_string()],
            })
            .collect()
    }

    fn resolve(&self, parsed: Option<NaiveDateTime>) -> (NaiveDateTime, TimestampSource) {
        match parsed {
            Some(ts) => (ts, TimestampSource::Parsed),
            None => (self.now, TimestampSource::Fallback),
        }
    }
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 行が新しいエントリの開始行かどうか
///
/// 形が決まっていない場合は、いずれかのタイムスタンプ形か先頭の重大度トークンで判定する
fn is_entry_start(line: &str, shape: Option<TimestampShape>) -> bool {
    match shape {
        Some(shape) => line_starts_with_shape(line, shape),
        None => {
            DETECTION_SHAPES
                .iter()
                .any(|s| line_starts_with_shape(line, *s))
                || line_starts_with_severity(line)
        }
    }
}

/// イベントログのレコードから `Source:` の値を取り出す
fn event_block_source(block: &[String]) -> Option<String> {
    block.iter().find_map(|line| {
        line.trim_start()
            .strip_prefix("Source:")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
