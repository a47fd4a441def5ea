//! Connection resolver: configured targets to database sessions

use crate::duckdb::DuckDbBackend;
use crate::error::DbResult;
use crate::mysql::MySqlBackend;
use crate::traits::Database;
use cv_core::{DbType, TargetConfig};
use std::sync::Arc;

/// Open a session for a configured target
pub async fn connect(target: &TargetConfig) -> DbResult<Arc<dyn Database>> {
    match target.db_type {
        DbType::DuckDb => {
            let path = target.duckdb_path();
            log::debug!("Opening DuckDB database at {}", path);
            Ok(Arc::new(DuckDbBackend::new(path)?))
        }
        DbType::MySql => {
            let profile = target.profile()?;
            Ok(Arc::new(MySqlBackend::connect(&profile).await?))
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
