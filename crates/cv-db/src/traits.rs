//! Database trait definition

use crate::error::DbResult;
use crate::row::Row;
use async_trait::async_trait;

/// Database abstraction trait for covdb
///
/// A backend is one session. Statements run in autocommit mode, each one
/// committed as soon as it succeeds. Implementations must be Send + Sync
/// for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute one SQL statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<u64>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists; `name` may be schema-qualified
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Execute query returning all rows as text
    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>>;

    /// Execute query returning the first column of every row as integers
    async fn query_ids(&self, sql: &str) -> DbResult<Vec<i64>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
