//! # List Logs Use Case
//!
//! カテゴリのログ列挙ユースケース

use std::sync::Arc;

use crate::domain::entities::log_category::{LogCategory, LogFileRef};
use crate::domain::repositories::log_repository::LogRepository;

/// ログ列挙ユースケース
///
/// 指定されたカテゴリのログファイル（またはイベントログ）を列挙する
pub struct ListLogsUseCase<R: LogRepository> {
    log_repository: Arc<R>,
}

impl<R: LogRepository> ListLogsUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `log_repository` - ログリポジトリ
    pub fn new(log_repository: Arc<R>) -> Self {
        Self { log_repository }
    }

    /// ログを列挙する
    ///
    /// # Arguments
    ///
    /// * `category` - 列挙対象のカテゴリ
    ///
    /// # Returns
    ///
    /// 見つかったログの参照（アクセスできない場合は空）
    pub fn execute(&self, category: &LogCategory) -> Vec<LogFileRef> {
        self.log_repository.list_files(category)
    }
}
