//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **LogCategory / CategoryRegistry / LogFileRef**: ログソースの定義と列挙結果
//! - **LogFormat / LogEntry**: 検出された形式と正規化エントリ
//! - **IssuePattern / IssueCatalog / IssueMatchResult**: ナレッジベースとマッチ結果
//! - **EntryFilter / SearchResult**: フィルタ条件と検索結果

pub mod issue;
pub mod log_category;
pub mod log_entry;
pub mod search;
