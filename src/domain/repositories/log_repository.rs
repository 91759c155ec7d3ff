//! # Log Repository Trait
//!
//! ログの列挙と読み込みを抽象化

use anyhow::Result;

use crate::domain::entities::log_category::{LogCategory, LogFileRef};

/// ログリポジトリ
///
/// カテゴリに属するログの列挙と、生の行の読み込みを担当するリポジトリ
pub trait LogRepository {
    /// カテゴリのログファイル（またはイベントログ）を列挙する
    ///
    /// # Arguments
    ///
    /// * `category` - 列挙対象のカテゴリ
    ///
    /// # Returns
    ///
    /// 見つかったログの参照。ルートにアクセスできない場合やイベントソースが
    /// 存在しない場合は、エラーではなく空のリストを返す
    fn list_files(&self, category: &LogCategory) -> Vec<LogFileRef>;

    /// ログの生の行を読み込む
    ///
    /// # Arguments
    ///
    /// * `category` - ログが属するカテゴリ
    /// * `file` - 読み込むログの参照
    ///
    /// # Errors
    ///
    /// 読み込みに失敗した場合にエラーを返す
    fn read_lines(&self, category: &LogCategory, file: &LogFileRef) -> Result<Vec<String>>;
}
