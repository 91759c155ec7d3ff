//! # Parse Logs Use Case
//!
//! ログの読み込み・形式判定・パース・フィルタのユースケース

use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::entities::log_category::{LogCategory, LogFileRef};
use crate::domain::entities::log_entry::{LogEntry, LogFormat};
use crate::domain::entities::search::EntryFilter;
use crate::domain::repositories::log_repository::LogRepository;
use crate::domain::services::entry_parser::EntryParser;
use crate::domain::services::format_detector::FormatDetector;

/// パース結果
#[derive(Debug, Clone, Serialize)]
pub struct ParsedLog {
    pub format: LogFormat,
    pub entries: Vec<LogEntry>,
}

/// ログパースユースケース
///
/// ログを読み込み、形式を判定してエントリに変換し、条件でフィルタする
pub struct ParseLogsUseCase<R: LogRepository> {
    log_repository: Arc<R>,
}

impl<R: LogRepository> ParseLogsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `log_repository` - ログリポジトリ
    pub fn new(log_repository: Arc<R>) -> Self {
        Self { log_repository }
    }

    /// ログをパースする
    ///
    /// # Arguments
    ///
    /// * `category` - ログが属するカテゴリ
    /// * `file` - 対象のログ
    /// * `filter` - エントリのフィルタ条件
    ///
    /// # Returns
    ///
    /// 判定された形式とフィルタ後のエントリ。読み込みに失敗した場合はエントリなし
    pub fn execute(&self, category: &LogCategory, file: &LogFileRef, filter: &EntryFilter) -> ParsedLog {
        let lines = match self.log_repository.read_lines(category, file) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Failed to read {}: {:#}", file.location, e);
                return ParsedLog {
                    format: LogFormat::unknown(),
                    entries: Vec::new(),
                };
            }
        };

        parse_content(&lines, &file.display_name, filter)
    }
}

/// 生の行を形式判定してパースし、フィルタする
///
/// # Arguments
///
/// * `lines` - ログ全体の生の行
/// * `display_name` - 表示名（形式判定のヒントと既定のソース名）
/// * `filter` - エントリのフィルタ条件
pub fn parse_content<S: AsRef<str>>(lines: &[S], display_name: &str, filter: &EntryFilter) -> ParsedLog {
    let format = FormatDetector::detect(lines, display_name);
    let entries = EntryParser::new().parse(lines, &format, display_name);
    let total = entries.len();
    let entries = filter.apply(entries);

    debug!(
        "Parsed {} as {:?}: {} entries, {} after filter",
        display_name,
        format.kind,
        total,
        entries.len()
    );

    ParsedLog { format, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::log_entry::{FormatKind, TimestampShape};
    use anyhow::Result;

    struct MockLogRepository {
        lines: Option<Vec<String>>,
    }

    impl LogRepository for MockLogRepository {
        fn list_files(&self, _category: &LogCategory) -> Vec<LogFileRef> {
            vec![]
        }

        fn read_lines(&self, _category: &LogCategory, _file: &LogFileRef) -> Result<Vec<String>> {
            match &self.lines {
                Some(lines) => Ok(lines.clone()),
                None => anyhow::bail!("Access denied"),
            }
        }
    }

    fn create_test_ref() -> LogFileRef {
        LogFileRef {
            display_name: "app.log".to_string(),
            location: "/var/log/app.log".to_string(),
            size_or_record_count: 100,
            last_modified: None,
        }
    }

    fn category() -> LogCategory {
        LogCategory::file_set("App", "app", &["/var/log"], None)
    }

    #[test]
    fn test_parse_logs_detects_and_parses() {
        let lines = vec![
            "2024-01-05T10:00:00 INFO started".to_string(),
            "2024-01-05T10:00:01 ERROR disk full".to_string(),
        ];
        let use_case = ParseLogsUseCase::new(Arc::new(MockLogRepository { lines: Some(lines) }));

        let parsed = use_case.execute(&category(), &create_test_ref(), &EntryFilter::default());

        assert_eq!(parsed.format.kind, FormatKind::Structured);
        assert_eq!(parsed.format.timestamp_shape, Some(TimestampShape::Iso8601));
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries[1].level, "ERROR");
        assert_eq!(parsed.entries[0].source, "app.log");
    }

    #[test]
    fn test_parse_logs_applies_filter() {
        let lines = vec![
            "2024-01-05T10:00:00 INFO started".to_string(),
            "2024-01-05T10:00:01 ERROR disk full".to_string(),
        ];
        let use_case = ParseLogsUseCase::new(Arc::new(MockLogRepository { lines: Some(lines) }));
        let filter = EntryFilter::new(Some("DISK".to_string()), None);

        let parsed = use_case.execute(&category(), &create_test_ref(), &filter);

        assert_eq!(parsed.entries.len(), 1);
        assert!(parsed.entries[0].message.contains("disk full"));
    }

    #[test]
    fn test_parse_logs_read_failure_is_empty() {
        let use_case = ParseLogsUseCase::new(Arc::new(MockLogRepository { lines: None }));

        let parsed = use_case.execute(&category(), &create_test_ref(), &EntryFilter::default());

        assert!(parsed.entries.is_empty());
        assert_eq!(parsed.format.kind, FormatKind::Unknown);
    }
}
