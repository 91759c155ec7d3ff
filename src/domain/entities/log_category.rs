//! # LogCategory Entity
//!
//! ログソース（カテゴリ）とカテゴリレジストリ、列挙されたログファイルの参照

use chrono::{DateTime, Local};
use serde::Serialize;

/// 拡張子フィルタが指定されていない場合の既定値
pub const DEFAULT_EXTENSIONS: [&str; 2] = [".log", ".txt"];

/// ログソースへのアクセス方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessType {
    /// ホストのイベントログ（`roots` はログ名）
    EventSource,
    /// ファイル群（`roots` はディレクトリ）
    FileSet,
}

/// ログカテゴリ
///
/// 実行中は不変のログソース定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogCategory {
    pub name: String,
    pub description: String,
    pub access_type: AccessType,
    pub roots: Vec<String>,
    /// 拡張子フィルタ（`None` の場合は [`DEFAULT_EXTENSIONS`]）
    pub extensions: Option<Vec<String>>,
}

impl LogCategory {
    /// イベントログ型のカテゴリを作成
    pub fn event_source(name: &str, description: &str, log_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            access_type: AccessType::EventSource,
            roots: log_names.iter().map(|s| s.to_string()).collect(),
            extensions: None,
        }
    }

    /// ファイル型のカテゴリを作成
    pub fn file_set(
        name: &str,
        description: &str,
        roots: &[&str],
        extensions: Option<&[&str]>,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            access_type: AccessType::FileSet,
            roots: roots.iter().map(|s| s.to_string()).collect(),
            extensions: extensions.map(|exts| exts.iter().map(|s| s.to_string()).collect()),
        }
    }

    /// 有効な拡張子フィルタ（小文字、先頭ドット付き）
    pub fn effective_extensions(&self) -> Vec<String> {
        let normalize = |ext: &str| {
            let ext = ext.trim().to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        };

        match &self.extensions {
            Some(exts) => exts.iter().map(|e| normalize(e)).collect(),
            None => DEFAULT_EXTENSIONS.iter().map(|e| normalize(e)).collect(),
        }
    }

    /// ファイル名が拡張子フィルタに一致するか
    ///
    /// 多数のファイルを判定する場合は [`effective_extensions`](Self::effective_extensions)
    /// を一度だけ求めて [`has_extension`] を使う
    pub fn accepts_file_name(&self, file_name: &str) -> bool {
        has_extension(file_name, &self.effective_extensions())
    }
}

/// ファイル名が正規化済みの拡張子のいずれかで終わるか（大文字小文字を区別しない）
pub fn has_extension(file_name: &str, extensions: &[String]) -> bool {
    let lower = file_name.to_lowercase();
    extensions.iter().any(|ext| lower.ends_with(ext.as_str()))
}

/// 列挙されたログファイル（またはイベントログ）への参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFileRef {
    pub display_name: String,
    /// ファイルパスまたはイベントログ名
    pub location: String,
    /// ファイルサイズ（バイト）またはレコード数
    pub size_or_record_count: u64,
    pub last_modified: Option<DateTime<Local>>,
}

/// カテゴリレジストリ
///
/// プロセス全体のシングルトンではなく、各操作に明示的に渡すコンテキスト
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<LogCategory>,
}

impl CategoryRegistry {
    pub fn new(categories: Vec<LogCategory>) -> Self {
        Self { categories }
    }

    /// 組み込みのカテゴリ表
    pub fn builtin() -> Self {
        Self::new(vec![
            LogCategory::event_source("System", "Windows System event log", &["System"]),
            LogCategory::event_source(
                "Application",
                "Windows Application event log",
                &["Application"],
            ),
            LogCategory::event_source("Security", "Windows Security event log", &["Security"]),
            LogCategory::event_source(
                "PowerShell",
                "PowerShell operational event logs",
                &[
                    "Windows PowerShell",
                    "Microsoft-Windows-PowerShell/Operational",
                ],
            ),
            LogCategory::file_set(
                "IIS",
                "IIS web server logs",
                &["C:\\inetpub\\logs\\LogFiles"],
                Some(&[".log"]),
            ),
            LogCategory::file_set(
                "WindowsUpdate",
                "Windows Update and servicing logs",
                &["C:\\Windows\\Logs\\WindowsUpdate", "C:\\Windows\\Logs\\CBS"],
                Some(&[".log"]),
            ),
            LogCategory::file_set(
                "Setup",
                "Windows setup and driver install logs",
                &["C:\\Windows\\Panther", "C:\\Windows\\INF"],
                Some(&[".log"]),
            ),
            LogCategory::file_set(
                "Temp",
                "Application logs left in the user's temp directory",
                &["~/AppData/Local/Temp"],
                None,
            ),
        ])
    }

    /// 名前でカテゴリを検索（大文字小文字を区別しない）
    pub fn get(&self, name: &str) -> Option<&LogCategory> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogCategory> {
        self.categories.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
