//! # Knowledge Repository Trait
//!
//! ナレッジベースの永続化を抽象化

use anyhow::Result;

use crate::domain::entities::issue::IssueCatalog;

/// ナレッジリポジトリ
///
/// ナレッジベース全体を1つの保存先に読み書きするリポジトリ
pub trait KnowledgeRepository {
    /// ナレッジベースを読み込む
    ///
    /// # Returns
    ///
    /// 保存先が存在しない場合は `None`
    ///
    /// # Errors
    ///
    /// 保存先が読めない、または内容が壊れている場合にエラーを返す
    fn load(&self) -> Result<Option<IssueCatalog>>;

    /// ナレッジベース全体を保存し、既存の内容を置き換える
    ///
    /// # Errors
    ///
    /// 書き込みに失敗した場合にエラーを返す
    fn save(&self, catalog: &IssueCatalog) -> Result<()>;
}
