//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// ナレッジベースファイルのパス
    pub knowledge_base_path: String,
    /// イベントログのテキストエクスポートを置くディレクトリ
    pub event_log_dir: String,
    /// 検索期間の既定値（時間）
    pub default_search_hours: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base_path: "./.logsift/knowledge-base.json".to_string(),
            event_log_dir: "./.logsift/eventlogs".to_string(),
            default_search_hours: 24,
        }
    }
}

impl Config {
    /// 設定ファイルを読み込む。ファイルがなければ既定値
    pub fn load(path: &str) -> Result<Self> {
        let path = expand_path(path);

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Config =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    pub fn knowledge_base_path(&self) -> PathBuf {
        expand_path(&self.knowledge_base_path)
    }

    pub fn event_log_dir(&self) -> PathBuf {
        expand_path(&self.event_log_dir)
    }
}

/// `~` を展開したパス
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    Path::new(expanded.as_ref()).to_path_buf()
}
