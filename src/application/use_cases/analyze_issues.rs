//! # Analyze Issues Use Case
//!
//! エントリから既知の問題を見つけ、出現回数を記録するユースケース

use log::{info, warn};

use crate::application::use_cases::knowledge_base::KnowledgeBase;
use crate::domain::entities::issue::IssueMatchResult;
use crate::domain::entities::log_entry::LogEntry;
use crate::domain::repositories::knowledge_repository::KnowledgeRepository;
use crate::domain::services::issue_matcher::IssueMatcher;

/// 問題解析ユースケース
pub struct AnalyzeIssuesUseCase;

impl AnalyzeIssuesUseCase {
    /// エントリを解析する
    ///
    /// マッチした問題ごとに出現回数を1増やす（保存の失敗は警告のみ）
    ///
    /// # Arguments
    ///
    /// * `knowledge_base` - ナレッジベース
    /// * `entries` - 解析対象のエントリ
    ///
    /// # Returns
    ///
    /// マッチ数の降順の結果
    pub fn execute<K: KnowledgeRepository>(
        knowledge_base: &mut KnowledgeBase<K>,
        entries: &[LogEntry],
    ) -> Vec<IssueMatchResult> {
        let results = IssueMatcher::find_matches(knowledge_base.catalog(), entries);

        for result in &results {
            if let Err(e) = knowledge_base.record_match(&result.issue_name) {
                warn!(
                    "Failed to record match for '{}': {:#}",
                    result.issue_name, e
                );
            }
        }

        info!(
            "Analyzed {} entries: {} known issues found",
            entries.len(),
            results.len()
        );

        results
    }
}
