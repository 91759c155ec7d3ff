//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - ファイルシステムやホストのイベントログについて何も知らない
//! - 入力はただのテキスト行とカテゴリ定義、出力はただのデータ
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（LogCategory, LogEntry, IssuePatternなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（形式判定、パース、問題マッチング）

pub mod entities;
pub mod repositories;
pub mod services;
