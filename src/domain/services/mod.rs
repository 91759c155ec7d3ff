//! # Domain Services
//!
//! エンティティに属さない純粋なビジネスロジック
//!
//! - **extractors**: タイムスタンプ形・重大度トークンの判定と抽出
//! - **format_detector**: ログ形式の判定
//! - **entry_parser**: 生の行から正規化エントリへの変換
//! - **issue_matcher**: 既知の問題パターンとのマッチング

pub mod entry_parser;
pub mod extractors;
pub mod format_detector;
pub mod issue_matcher;
