//! cv-db - Database abstraction layer for covdb
//!
//! This crate provides the `Database` trait, a DuckDB backend used for local
//! runs and tests, a MySQL backend built on sqlx, and `connect`, which turns a
//! configured target into a session.

pub mod duckdb;
pub mod error;
pub mod mysql;
pub mod resolver;
pub mod row;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use mysql::MySqlBackend;
pub use resolver::connect;
pub use row::Row;
pub use traits::Database;
