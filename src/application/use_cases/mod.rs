//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ListLogsUseCase**: カテゴリのログ列挙
//! - **ParseLogsUseCase**: 読み込み・形式判定・パース・フィルタ
//! - **KnowledgeBase**: ナレッジベースの読み込みと更新
//! - **AnalyzeIssuesUseCase**: 既知の問題の検出
//! - **SearchLogsUseCase**: カテゴリ横断検索

pub mod analyze_issues;
pub mod knowledge_base;
pub mod list_logs;
pub mod parse_logs;
pub mod search_logs;
