//! # Issue Entities
//!
//! 既知の問題パターン、ナレッジベースの内容、マッチ結果

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use super::log_entry::LogEntry;

/// ナレッジベース操作のエラー
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// 同名の問題が既に登録されている
    #[error("issue '{0}' already exists")]
    AlreadyExists(String),

    /// 永続化に失敗した
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}

/// 既知の問題パターン
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssuePattern {
    /// 一意キー
    pub name: String,
    /// マッチ用の正規表現
    pub pattern: String,
    pub solution_text: String,
    pub category: String,
    /// 単調増加する出現回数
    pub occurrence_count: u64,
}

impl IssuePattern {
    pub fn new(name: &str, pattern: &str, solution_text: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            solution_text: solution_text.to_string(),
            category: category.to_string(),
            occurrence_count: 0,
        }
    }
}

/// ナレッジベースの内容（名前 → 問題パターン）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueCatalog {
    issues: BTreeMap<String, IssuePattern>,
}

impl IssueCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みの初期データ（すべて出現回数 0）
    pub fn seeded() -> Self {
        let seeds = [
            IssuePattern::new(
                "Permission Denied",
                r"access (is )?denied|permission denied|unauthorized",
                "Run the tool or service with an account that has the required rights, \
                 or fix the ACL on the target file, folder or registry key.",
                "Security",
            ),
            IssuePattern::new(
                "Service Start Failure",
                r"service .*(failed to start|could not be started|did not start)|failed to start",
                "Check the service's dependencies and logon account, then start it manually \
                 (sc query / Start-Service) to see the underlying error.",
                "Services",
            ),
            IssuePattern::new(
                "Port Conflict",
                r"address already in use|port \d+ .*(in use|already bound)|only one usage of each socket address",
                "Find the process holding the port (netstat -ano / Get-NetTCPConnection) \
                 and stop it or move one of the services to a different port.",
                "Network",
            ),
            IssuePattern::new(
                "Disk Space",
                r"disk (full|insufficient)|no space left on device|not enough (disk )?space",
                "Free up space on the affected volume (Disk Cleanup, clear temp folders, \
                 rotate logs) or extend the volume.",
                "Storage",
            ),
            IssuePattern::new(
                "Missing File",
                r"file not found|cannot find (the )?(file|path)|no such file or directory",
                "Verify the path in the configuration, restore the missing file, \
                 or reinstall the component that owns it.",
                "FileSystem",
            ),
        ];

        let mut catalog = Self::new();
        for issue in seeds {
            catalog.issues.insert(issue.name.clone(), issue);
        }
        catalog
    }

    /// 新しい問題を追加する
    ///
    /// # Errors
    ///
    /// 同名の問題が存在する場合は [`KnowledgeError::AlreadyExists`] を返し、内容は変更しない
    pub fn insert_new(&mut self, issue: IssuePattern) -> Result<(), KnowledgeError> {
        if self.issues.contains_key(&issue.name) {
            return Err(KnowledgeError::AlreadyExists(issue.name));
        }
        self.issues.insert(issue.name.clone(), issue);
        Ok(())
    }

    /// 既存データの読み込み用（上書き挿入）
    pub fn insert(&mut self, issue: IssuePattern) {
        self.issues.insert(issue.name.clone(), issue);
    }

    /// 問題を削除する
    pub fn remove(&mut self, name: &str) -> Option<IssuePattern> {
        self.issues.remove(name)
    }

    /// 出現回数を1増やす。未登録の名前の場合は何もせず `false`
    pub fn increment(&mut self, name: &str) -> bool {
        match self.issues.get_mut(name) {
            Some(issue) => {
                issue.occurrence_count += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&IssuePattern> {
        self.issues.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.issues.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IssuePattern> {
        self.issues.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// 1回の解析で得られる問題のマッチ結果（永続化されない）
#[derive(Debug, Clone, Serialize)]
pub struct IssueMatchResult {
    pub issue_name: String,
    pub pattern: String,
    pub solution_text: String,
    pub category: String,
    pub matching_entries: Vec<LogEntry>,
    pub match_count: usize,
}
