//! # Logsift
//!
//! ホストのログを分類・解析・検索し、既知の問題と対処法を提示するツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: カテゴリ、エントリ、問題パターンと純粋な解析ロジック（外部依存なし）
//! - **Application層**: 列挙・パース・検索・問題解析のユースケース
//! - **Adapter層**: ファイルシステム、イベントログのエクスポート、ナレッジベースの永続化、設定
//! - **Driver層**: CLI、依存性注入

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
