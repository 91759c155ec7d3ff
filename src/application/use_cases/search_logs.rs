//! # Search Logs Use Case
//!
//! すべてのカテゴリを横断する検索ユースケース

use log::info;
use std::sync::Arc;

use crate::application::dto::search_query::SearchQuery;
use crate::application::use_cases::list_logs::ListLogsUseCase;
use crate::application::use_cases::parse_logs::ParseLogsUseCase;
use crate::domain::entities::log_category::CategoryRegistry;
use crate::domain::entities::search::SearchResult;
use crate::domain::repositories::log_repository::LogRepository;

/// 横断検索ユースケース
///
/// 登録済みの全カテゴリについて 列挙 → パース → フィルタ を順に行う（並列化しない）
pub struct SearchLogsUseCase<R: LogRepository> {
    registry: CategoryRegistry,
    list_use_case: ListLogsUseCase<R>,
    parse_use_case: ParseLogsUseCase<R>,
}

impl<R: LogRepository> SearchLogsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `registry` - 検索対象のカテゴリレジストリ
    /// * `log_repository` - ログリポジトリ
    pub fn new(registry: CategoryRegistry, log_repository: Arc<R>) -> Self {
        Self {
            registry,
            list_use_case: ListLogsUseCase::new(log_repository.clone()),
            parse_use_case: ParseLogsUseCase::new(log_repository),
        }
    }

    /// 検索する
    ///
    /// # Arguments
    ///
    /// * `query` - 検索条件
    ///
    /// # Returns
    ///
    /// 1件以上一致したファイルごとの結果。一致のないカテゴリ・ファイルは含まない
    pub fn execute(&self, query: &SearchQuery) -> Vec<SearchResult> {
        let filter = query.to_filter();
        let mut results = Vec::new();

        for category in self.registry.iter() {
            for file_ref in self.list_use_case.execute(category) {
                let parsed = self.parse_use_case.execute(category, &file_ref, &filter);
                if parsed.entries.is_empty() {
                    continue;
                }

                results.push(SearchResult {
                    category: category.name.clone(),
                    file_ref,
                    match_count: parsed.entries.len(),
                    entries: parsed.entries,
                });
            }
        }

        info!(
            "Search for '{}' matched {} entries in {} logs",
            query.term,
            results.iter().map(|r| r.match_count).sum::<usize>(),
            results.len()
        );

        results
    }
}
