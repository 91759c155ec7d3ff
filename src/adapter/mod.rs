//! Adapter Layer
//!
//! 外部システム（ファイルシステム、イベントログ、設定ファイル）との統合

pub mod config;
pub mod event_log;
pub mod repositories;
pub mod text_file;
