//! MySQL database backend implementation (sqlx)

use crate::error::{DbError, DbResult};
use crate::row::Row;
use crate::traits::Database;
use async_trait::async_trait;
use cv_core::ConnectionProfile;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column as _, Row as _};

/// MySQL database backend.
///
/// The pool holds exactly one connection and never reaps it, so every
/// statement runs on the same server session. Session state such as `USE`
/// carries over from one statement to the next.
pub struct MySqlBackend {
    pool: MySqlPool,
}

impl MySqlBackend {
    /// Open a session for a connection profile
    pub async fn connect(profile: &ConnectionProfile) -> DbResult<Self> {
        log::debug!("Connecting to {}", profile);
        let pool = Self::pool_options()
            .connect_with(Self::connect_options(profile))
            .await
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", profile, e)))?;
        Ok(Self { pool })
    }

    /// Connection options for a profile
    pub fn connect_options(profile: &ConnectionProfile) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&profile.host)
            .port(profile.port)
            .username(&profile.user)
            .password(&profile.password);
        match &profile.default_schema {
            Some(schema) => options.database(schema),
            None => options,
        }
    }

    fn pool_options() -> MySqlPoolOptions {
        MySqlPoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .idle_timeout(None)
            .max_lifetime(None)
    }

    fn render_row(row: &MySqlRow) -> DbResult<Row> {
        let columns: Vec<String> = row.columns().iter().map(|c| c.name().to_string()).collect();
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            // Text-protocol values decode as strings whatever their declared type
            let value: Option<String> = row.try_get_unchecked(i)?;
            values.push(value);
        }
        Ok(Row::new(columns, values))
    }
}

#[async_trait]
impl Database for MySqlBackend {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        let result = sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        sqlx::raw_sql(sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let (schema, table) = match name.rfind('.') {
            Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
            None => (None, name),
        };

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = COALESCE(?, DATABASE()) AND table_name = ?",
        )
        .bind(schema)
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        let wrapped = format!("SELECT COUNT(*) FROM ({}) AS q", sql);
        let count: i64 = sqlx::query_scalar(&wrapped)
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }

    async fn query_rows(&self, sql: &str) -> DbResult<Vec<Row>> {
        let rows = sqlx::raw_sql(sql).fetch_all(&self.pool).await?;
        rows.iter().map(Self::render_row).collect()
    }

    async fn query_ids(&self, sql: &str) -> DbResult<Vec<i64>> {
        let rows = self.query_rows(sql).await?;
        rows.iter()
            .map(|row| {
                let raw = row.get_index(0).ok_or_else(|| {
                    DbError::ExecutionError(format!("NULL identifier returned by: {}", sql))
                })?;
                raw.parse::<i64>().map_err(|e| {
                    DbError::ExecutionError(format!("Non-integer identifier '{}': {}", raw, e))
                })
            })
            .collect()
    }

    fn db_type(&self) -> &'static str {
        "mysql"
    }
}

#[cfg(test)]
#[path = "mysql_test.rs"]
mod tests;
