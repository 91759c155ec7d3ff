//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod json_knowledge_repository;
pub mod local_log_repository;
