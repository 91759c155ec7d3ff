//! Event Log Access
//!
//! ホストのイベントログへのアクセスを抽象化

pub mod exported;

use anyhow::Result;
use chrono::{DateTime, Local};

#[cfg(test)]
use mockall::automock;

pub use exported::ExportedEventLogReader;

/// イベントログの概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLogStat {
    pub record_count: u64,
    pub last_written: Option<DateTime<Local>>,
}

/// Trait for event log access
/// This enables mocking in tests while reading real exports in production
#[cfg_attr(test, automock)]
pub trait EventLogReader {
    /// イベントログのレコード数と最終書き込み時刻を取得する
    ///
    /// # Errors
    ///
    /// イベントログが存在しない、または読めない場合にエラーを返す
    fn stat(&self, log_name: &str) -> Result<EventLogStat>;

    /// イベントログのレコードをテキスト行として読み込む
    ///
    /// # Errors
    ///
    /// イベントログが存在しない、または読めない場合にエラーを返す
    fn read_lines(&self, log_name: &str) -> Result<Vec<String>>;
}
