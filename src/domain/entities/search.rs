//! # Search Entities
//!
//! エントリのフィルタ条件とカテゴリ横断検索の結果

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use super::log_category::LogFileRef;
use super::log_entry::LogEntry;

/// 時間範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `now` から遡って `hours` 時間の範囲
    ///
    /// `hours` が負、または表現できる日時の範囲を超える場合は `None`
    pub fn last_hours(hours: i64, now: NaiveDateTime) -> Option<Self> {
        if hours < 0 {
            return None;
        }
        let start = now.checked_sub_signed(Duration::try_hours(hours)?)?;
        Some(Self::new(start, now))
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }
}

/// エントリのフィルタ条件
///
/// 両方とも `None` の場合はすべてのエントリが残る
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub term: Option<String>,
    pub window: Option<TimeWindow>,
}

impl EntryFilter {
    pub fn new(term: Option<String>, window: Option<TimeWindow>) -> Self {
        // 空文字の検索語は指定なしとして扱う
        let term = term.filter(|t| !t.is_empty());
        Self { term, window }
    }

    pub fn matches(&self, entry: &LogEntry) -> bool {
        if let Some(window) = &self.window {
            if !window.contains(entry.timestamp) {
                return false;
            }
        }

        match &self.term {
            Some(term) => entry.contains_term(term),
            None => true,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.window.is_none()
    }

    /// 条件に一致するエントリだけを残す（順序は維持）
    pub fn apply(&self, entries: Vec<LogEntry>) -> Vec<LogEntry> {
        if self.is_empty() {
            return entries;
        }
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// カテゴリ横断検索の結果（1ファイルにつき1件）
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub category: String,
    pub file_ref: LogFileRef,
    pub entries: Vec<LogEntry>,
    pub match_count: usize,
}
