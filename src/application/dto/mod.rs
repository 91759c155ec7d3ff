//! # Data Transfer Objects
//!
//! ユースケースの入力

pub mod search_query;
