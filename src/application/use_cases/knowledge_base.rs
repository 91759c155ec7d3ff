//! # Knowledge Base Use Case
//!
//! ナレッジベースの読み込み・保存・問題の追加・出現回数の記録

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::entities::issue::{IssueCatalog, IssuePattern, KnowledgeError};
use crate::domain::repositories::knowledge_repository::KnowledgeRepository;

/// ナレッジベース
///
/// 起動時に一度読み込み、変更のたびに同期的に保存する
pub struct KnowledgeBase<K: KnowledgeRepository> {
    repository: Arc<K>,
    catalog: IssueCatalog,
}

impl<K: KnowledgeRepository> KnowledgeBase<K> {
    /// ナレッジベースを読み込む
    ///
    /// 保存先が存在しない場合は初期データを作成して即座に保存する。
    /// 読めない・壊れている場合は警告を出して初期データで置き換える
    ///
    /// # Arguments
    ///
    /// * `repository` - ナレッジリポジトリ
    pub fn load(repository: Arc<K>) -> Self {
        let catalog = match repository.load() {
            Ok(Some(catalog)) => {
                info!("Loaded knowledge base: {} issues", catalog.len());
                return Self {
                    repository,
                    catalog,
                };
            }
            Ok(None) => {
                info!("No existing knowledge base found, seeding defaults");
                IssueCatalog::seeded()
            }
            Err(e) => {
                warn!("Knowledge base is unreadable, re-seeding defaults: {:#}", e);
                IssueCatalog::seeded()
            }
        };

        let knowledge_base = Self {
            repository,
            catalog,
        };
        if let Err(e) = knowledge_base.save() {
            warn!("Failed to persist seeded knowledge base: {:#}", e);
        }
        knowledge_base
    }

    /// 全内容を保存する
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    pub fn save(&self) -> Result<()> {
        self.repository.save(&self.catalog)
    }

    /// 新しい問題を追加して保存する（出現回数は 1 から開始）
    ///
    /// # Errors
    ///
    /// 同名の問題がある場合は [`KnowledgeError::AlreadyExists`]（内容は変更しない）、
    /// 保存に失敗した場合は [`KnowledgeError::Persist`]
    pub fn add_issue(
        &mut self,
        name: &str,
        pattern: &str,
        solution_text: &str,
        category: &str,
    ) -> Result<(), KnowledgeError> {
        let mut issue = IssuePattern::new(name, pattern, solution_text, category);
        issue.occurrence_count = 1;

        self.catalog.insert_new(issue)?;
        if let Err(e) = self.save() {
            // 保存できなかった問題はメモリ上にも残さない
            self.catalog.remove(name);
            return Err(e.into());
        }

        info!("Added issue '{}' to knowledge base", name);
        Ok(())
    }

    /// 問題の出現回数を1増やして保存する
    ///
    /// 未登録の名前の場合は何もしない
    ///
    /// # Errors
    ///
    /// 保存に失敗した場合にエラーを返す
    pub fn record_match(&mut self, name: &str) -> Result<()> {
        if !self.catalog.increment(name) {
            debug!("Ignoring match for unknown issue '{}'", name);
            return Ok(());
        }
        self.save()
    }

    /// 現在の内容
    pub fn catalog(&self) -> &IssueCatalog {
        &self.catalog
    }

    pub fn issues(&self) -> impl Iterator<Item = &IssuePattern> {
        self.catalog.iter()
    }
}
