//! Exported Event Log Reader
//!
//! イベントログのテキストエクスポート（`Log Name:` ブロック形式）を読むEventLogReader実装

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::{EventLogReader, EventLogStat};
use crate::adapter::text_file::read_text_lines;
use crate::domain::services::extractors::EVENT_LOG_MARKER;

/// エクスポートディレクトリ内の `<ログ名>.txt` を読むリーダー
pub struct ExportedEventLogReader {
    export_dir: PathBuf,
}

impl ExportedEventLogReader {
    /// 新しいリーダーを作成
    ///
    /// # Arguments
    ///
    /// * `export_dir` - エクスポートファイルを置くディレクトリ
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// ログ名に対応するエクスポートファイルのパス
    ///
    /// チャンネル名の `/` はホストのログファイル名と同じく `%4` で表す
    pub fn export_path(&self, log_name: &str) -> PathBuf {
        self.export_dir
            .join(format!("{}.txt", log_name.replace('/', "%4")))
    }

    fn existing_export(&self, log_name: &str) -> Result<PathBuf> {
        let path = self.export_path(log_name);
        if !path.is_file() {
            anyhow::bail!("Event log '{}' not found at {}", log_name, path.display());
        }
        Ok(path)
    }
}

fn last_written(path: &Path) -> Option<DateTime<Local>> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Local>::from)
}

impl EventLogReader for ExportedEventLogReader {
    fn stat(&self, log_name: &str) -> Result<EventLogStat> {
        let path = self.existing_export(log_name)?;
        let lines = read_text_lines(&path)
            .context(format!("Failed to read event log export for '{}'", log_name))?;

        let record_count = lines
            .iter()
            .filter(|line| line.trim_start().starts_with(EVENT_LOG_MARKER))
            .count() as u64;

        Ok(EventLogStat {
            record_count,
            last_written: last_written(&path),
        })
    }

    fn read_lines(&self, log_name: &str) -> Result<Vec<String>> {
        let path = self.existing_export(log_name)?;
        read_text_lines(&path)
    }
}
