//! Schema builder: ordered SQL scripts executed statement by statement

use cv_core::Config;
use cv_db::Database;
use cv_sql::{Script, SqlDialect};
use std::path::Path;

use crate::error::{EtlError, EtlResult, StatementFailure};

/// Executes scripts against one session.
///
/// Every statement is committed on its own; nothing is rolled back when a
/// later statement fails.
pub struct SchemaBuilder<'a> {
    db: &'a dyn Database,
}

impl<'a> SchemaBuilder<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Execute one script, returning the number of statements run
    pub async fn run_script(&self, script: &Script) -> Result<usize, StatementFailure> {
        let name = script.name();
        log::debug!(
            "Running {} ({} statements) on {}",
            name,
            script.statements.len(),
            self.db.db_type()
        );

        for (i, statement) in script.statements.iter().enumerate() {
            self.db
                .execute(statement)
                .await
                .map_err(|source| StatementFailure {
                    script: name.clone(),
                    index: i + 1,
                    source,
                })?;
        }
        Ok(script.statements.len())
    }

    /// Execute scripts in order, stopping at the first failure
    pub async fn build(&self, scripts: &[Script]) -> Result<usize, StatementFailure> {
        let mut executed = 0;
        for script in scripts {
            executed += self.run_script(script).await?;
        }
        Ok(executed)
    }
}

/// Build the full covariate database: the schema script, then every
/// building-block table script in order
pub async fn build_database(
    db: &dyn Database,
    config: &Config,
    root: &Path,
    dialect: &dyn SqlDialect,
) -> EtlResult<usize> {
    let scripts = Script::load_all(
        &config.schema_build_scripts(root),
        config.script_format,
        dialect,
    )?;

    let executed = SchemaBuilder::new(db)
        .build(&scripts)
        .await
        .map_err(EtlError::Build)?;

    log::info!(
        "Built database from {} scripts ({} statements)",
        scripts.len(),
        executed
    );
    Ok(executed)
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod tests;
