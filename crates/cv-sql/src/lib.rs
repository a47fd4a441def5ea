//! cv-sql - SQL script layer for covdb
//!
//! This crate turns SQL script files into executable statements: a
//! tokenizer-based splitter built on sqlparser-rs, the legacy `;--` delimiter
//! convention, and `:name` parameter binding.

pub mod dialect;
pub mod error;
pub mod params;
pub mod script;
pub mod splitter;

pub use dialect::{dialect_for, DuckDbDialect, MySqlDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use params::bind_params;
pub use script::Script;
pub use splitter::{split_delimited, split_statements, split_with_format};
