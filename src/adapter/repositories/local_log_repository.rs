//! Local Log Repository Implementation
//!
//! LogRepositoryのローカルホスト実装（ファイル群 + イベントログ）

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::path::Path;
use walkdir::WalkDir;

use crate::adapter::config::expand_path;
use crate::adapter::event_log::EventLogReader;
use crate::adapter::text_file::read_text_lines;
use crate::domain::entities::log_category::{has_extension, AccessType, LogCategory, LogFileRef};
use crate::domain::repositories::log_repository::LogRepository;

/// ローカルホストのログリポジトリ
pub struct LocalLogRepository<E: EventLogReader> {
    events: E,
}

impl<E: EventLogReader> LocalLogRepository<E> {
    /// 新しいリポジトリを作成
    ///
    /// # Arguments
    ///
    /// * `events` - イベントログのリーダー
    pub fn new(events: E) -> Self {
        Self { events }
    }

    /// ファイル型カテゴリの列挙（ルート以下を再帰的に探索）
    fn list_file_set(category: &LogCategory) -> Vec<LogFileRef> {
        let mut files = Vec::new();
        let extensions = category.effective_extensions();

        for root in &category.roots {
            let root = expand_path(root);
            if !root.exists() {
                warn!(
                    "Log directory for {} does not exist: {}",
                    category.name,
                    root.display()
                );
                continue;
            }

            for entry in WalkDir::new(&root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().to_string();
                if !has_extension(&file_name, &extensions) {
                    continue;
                }

                let metadata = match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(e) => {
                        debug!("Skipping {}: {}", entry.path().display(), e);
                        continue;
                    }
                };

                files.push(LogFileRef {
                    display_name: file_name,
                    location: entry.path().display().to_string(),
                    size_or_record_count: metadata.len(),
                    last_modified: metadata.modified().ok().map(DateTime::<Local>::from),
                });
            }
        }

        // 新しいものから
        files.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));

        info!("Found {} log files for {}", files.len(), category.name);
        files
    }

    /// イベントログ型カテゴリの列挙（レコードのあるログのみ）
    fn list_event_sources(&self, category: &LogCategory) -> Vec<LogFileRef> {
        let mut logs = Vec::new();

        for log_name in &category.roots {
            match self.events.stat(log_name) {
                Ok(stat) if stat.record_count > 0 => logs.push(LogFileRef {
                    display_name: log_name.clone(),
                    location: log_name.clone(),
                    size_or_record_count: stat.record_count,
                    last_modified: stat.last_written,
                }),
                Ok(_) => debug!("Event log {} has no records", log_name),
                Err(e) => warn!("Event log {} is not available: {:#}", log_name, e),
            }
        }

        info!("Found {} event logs for {}", logs.len(), category.name);
        logs
    }
}

impl<E: EventLogReader> LogRepository for LocalLogRepository<E> {
    fn list_files(&self, category: &LogCategory) -> Vec<LogFileRef> {
        match category.access_type {
            AccessType::FileSet => Self::list_file_set(category),
            AccessType::EventSource => self.list_event_sources(category),
        }
    }

    fn read_lines(&self, category: &LogCategory, file: &LogFileRef) -> Result<Vec<String>> {
        match category.access_type {
            AccessType::FileSet => read_text_lines(Path::new(&file.location)),
            AccessType::EventSource => self.events.read_lines(&file.location),
        }
    }
}
