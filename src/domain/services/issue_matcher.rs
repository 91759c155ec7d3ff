//! # Issue Matching Service
//!
//! 既知の問題パターンとエントリを突き合わせるサービス

use log::warn;
use regex::RegexBuilder;

use crate::domain::entities::issue::{IssueCatalog, IssueMatchResult};
use crate::domain::entities::log_entry::LogEntry;

/// 問題マッチングサービス
pub struct IssueMatcher;

impl IssueMatcher {
    /// すべての問題パターンを各エントリのメッセージに対して判定する
    ///
    /// # Arguments
    ///
    /// * `catalog` - ナレッジベースの内容
    /// * `entries` - 判定対象のエントリ
    ///
    /// # Returns
    ///
    /// 1件以上マッチした問題の結果（マッチ数の降順、同数は名前順）。
    /// パターンが不正な問題は警告を出してスキップする
    pub fn find_matches(catalog: &IssueCatalog, entries: &[LogEntry]) -> Vec<IssueMatchResult> {
        let mut results = Vec::new();

        for issue in catalog.iter() {
            let regex = match RegexBuilder::new(&issue.pattern)
                .case_insensitive(true)
                .build()
            {
                Ok(regex) => regex,
                Err(e) => {
                    warn!(
                        "Skipping issue '{}': invalid pattern '{}': {}",
                        issue.name, issue.pattern, e
                    );
                    continue;
                }
            };

            let matching_entries: Vec<LogEntry> = entries
                .iter()
                .filter(|entry| regex.is_match(&entry.message))
                .cloned()
                .collect();

            if matching_entries.is_empty() {
                continue;
            }

            results.push(IssueMatchResult {
                issue_name: issue.name.clone(),
                pattern: issue.pattern.clone(),
                solution_text: issue.solution_text.clone(),
                category: issue.category.clone(),
                match_count: matching_entries.len(),
                matching_entries,
            });
        }

        results.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        results
    }
}
