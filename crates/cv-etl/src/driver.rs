//! Migration driver: the three-phase copy into the `_new` tables
//!
//! 1. Schema creation runs the table-creation scripts. Failure is fatal.
//! 2. Bulk copy runs the `model_version` copy script. Failure is fatal.
//! 3. The incremental phase reads the identifier list back from the new
//!    `model_version` table and runs the `model` copy script once per
//!    identifier, in ascending order. Every statement is attempted even after
//!    an earlier one fails; an identifier with any failed statement is
//!    recorded as failed and the run moves on to the next one.
//!
//! The run summary is saved after every batch and at the end of the run. The
//! completion log is written only when at least one identifier failed. Both
//! files are kept per target, so resuming one environment never skips work
//! recorded for another.

use cv_core::{CompletionLog, Config, ModelVersionId, RunSummary};
use cv_db::Database;
use cv_sql::{bind_params, Script, SqlDialect};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{EtlError, EtlResult, StatementFailure};
use crate::schema::SchemaBuilder;

/// Migration phases, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SchemaCreation,
    BulkCopy,
    Incremental,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::SchemaCreation => write!(f, "schema creation"),
            Phase::BulkCopy => write!(f, "model_version bulk copy"),
            Phase::Incremental => write!(f, "model copy"),
        }
    }
}

/// Result of copying one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionOutcome {
    Completed,
    Failed(String),
}

/// Observer for migration progress. Every hook defaults to a no-op.
pub trait MigrationProgress: Send + Sync {
    fn phase_started(&self, _phase: Phase) {}

    /// Identifier list resolved: `pending` will be copied, `skipped` were
    /// already copied by an earlier run
    fn versions_resolved(&self, _pending: usize, _skipped: usize) {}

    fn version_finished(&self, _id: ModelVersionId, _outcome: &VersionOutcome) {}

    /// A batch finished and the run summary was flushed
    fn batch_finished(&self, _processed: usize, _pending: usize) {}
}

/// Progress observer that ignores every event
pub struct NoProgress;

impl MigrationProgress for NoProgress {}

/// The scripts a migration runs, loaded and split up front
#[derive(Debug, Clone)]
pub struct MigrationScripts {
    pub etl_tables: Vec<Script>,
    pub model_version_copy: Script,
    pub model_copy: Script,
}

impl MigrationScripts {
    /// Load every configured migration script relative to `root`
    pub fn load(config: &Config, root: &Path, dialect: &dyn SqlDialect) -> EtlResult<Self> {
        let format = config.script_format;
        Ok(Self {
            etl_tables: Script::load_all(&config.etl_table_scripts(root), format, dialect)?,
            model_version_copy: Script::load(
                &root.join(&config.scripts.model_version_copy),
                format,
                dialect,
            )?,
            model_copy: Script::load(&root.join(&config.scripts.model_copy), format, dialect)?,
        })
    }
}

/// Outcome of a finished migration run
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub summary: RunSummary,

    /// Where the run summary was saved
    pub summary_path: PathBuf,

    /// Where the completion log was written, if any identifier failed
    pub completion_log: Option<PathBuf>,
}

impl MigrationReport {
    pub fn completed(&self) -> &[ModelVersionId] {
        &self.summary.completed
    }

    pub fn failed(&self) -> Vec<ModelVersionId> {
        self.summary.failed_ids()
    }

    pub fn skipped(&self) -> &[ModelVersionId] {
        &self.summary.skipped
    }
}

/// Runs the migration against one session
pub struct MigrationDriver<'a> {
    db: &'a dyn Database,
    dialect: &'a dyn SqlDialect,
    config: &'a Config,
    root: &'a Path,
    target: String,
    resume: bool,
    progress: &'a dyn MigrationProgress,
}

impl<'a> MigrationDriver<'a> {
    /// Create a driver; output files resolve relative to `root`
    pub fn new(
        db: &'a dyn Database,
        dialect: &'a dyn SqlDialect,
        config: &'a Config,
        root: &'a Path,
    ) -> Self {
        Self {
            db,
            dialect,
            config,
            root,
            target: db.db_type().to_string(),
            resume: false,
            progress: &NoProgress,
        }
    }

    /// Name of the target, recorded in the run summary
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Skip identifiers that an earlier run already copied
    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn MigrationProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Run all three phases
    pub async fn run(&self, scripts: &MigrationScripts) -> EtlResult<MigrationReport> {
        let summary_path = self.config.results_path(self.root, &self.target);
        let log_path = self.config.completion_log_path(self.root, &self.target);

        let mut summary = RunSummary::new(&self.target);
        let carried = if self.resume {
            self.previously_copied(&log_path, &summary_path)?
        } else {
            BTreeSet::new()
        };

        log::info!(
            "Starting migration run {} against {} ({})",
            summary.run_id,
            self.target,
            self.db.db_type()
        );

        if let Err(err) = self
            .run_phases(scripts, &carried, &mut summary, &summary_path)
            .await
        {
            // Keep the carried ids resumable when the run stopped before
            // they were matched against the identifier list
            if summary.copied_ids().next().is_none() && summary.failed.is_empty() {
                for id in &carried {
                    summary.mark_skipped(*id);
                }
            }
            summary.mark_aborted(&err.to_string());
            if let Err(save_err) = summary.save(&summary_path) {
                log::warn!("Failed to save run summary: {}", save_err);
            }
            return Err(err);
        }

        summary.mark_finished();
        summary.save(&summary_path)?;

        let completion_log = if summary.has_failures() {
            let log = CompletionLog::new(summary.copied_ids());
            log.write(&log_path)?;
            log::warn!(
                "{} model versions failed; {} completed ids written to {}",
                summary.failed.len(),
                log.len(),
                log_path.display()
            );
            Some(log_path)
        } else {
            None
        };

        Ok(MigrationReport {
            summary,
            summary_path,
            completion_log,
        })
    }

    async fn run_phases(
        &self,
        scripts: &MigrationScripts,
        carried: &BTreeSet<ModelVersionId>,
        summary: &mut RunSummary,
        summary_path: &Path,
    ) -> EtlResult<()> {
        let builder = SchemaBuilder::new(self.db);

        self.progress.phase_started(Phase::SchemaCreation);
        let created = builder
            .build(&scripts.etl_tables)
            .await
            .map_err(EtlError::SchemaCreation)?;
        log::info!("Created target tables ({} statements)", created);

        self.progress.phase_started(Phase::BulkCopy);
        builder
            .run_script(&scripts.model_version_copy)
            .await
            .map_err(EtlError::BulkCopy)?;
        log::info!("Copied model_version");

        self.progress.phase_started(Phase::Incremental);
        self.check_bindings(&scripts.model_copy)?;

        let ids = self.read_ids().await?;
        let (skipped, pending): (Vec<ModelVersionId>, Vec<ModelVersionId>) =
            ids.into_iter().partition(|id| carried.contains(id));
        for &id in &skipped {
            summary.mark_skipped(id);
        }
        self.progress.versions_resolved(pending.len(), skipped.len());
        log::info!(
            "{} model versions to copy, {} already copied",
            pending.len(),
            skipped.len()
        );

        let mut processed = 0;
        for batch in pending.chunks(self.config.migration.batch_size.max(1)) {
            for &id in batch {
                let outcome = match self.copy_version(&scripts.model_copy, id).await {
                    Ok(()) => {
                        summary.mark_completed(id);
                        VersionOutcome::Completed
                    }
                    Err(err) => {
                        log::warn!("{}", err);
                        summary.mark_failed(id, &err.to_string());
                        VersionOutcome::Failed(err.to_string())
                    }
                };
                self.progress.version_finished(id, &outcome);
            }

            processed += batch.len();
            if let Err(e) = summary.save(summary_path) {
                log::warn!("Failed to save run summary: {}", e);
            }
            self.progress.batch_finished(processed, pending.len());
            log::info!(
                "Processed {}/{} model versions ({} failed)",
                processed,
                pending.len(),
                summary.failed.len()
            );
        }

        Ok(())
    }

    /// Run every statement of the per-identifier script. The identifier
    /// fails if any statement failed.
    async fn copy_version(&self, script: &Script, id: ModelVersionId) -> EtlResult<()> {
        let params = [(self.config.migration.id_param.as_str(), id.get())];
        let mut failures = Vec::new();
        for (i, statement) in script.statements.iter().enumerate() {
            let bound = bind_params(statement, self.dialect, &params)?;
            if let Err(source) = self.db.execute(&bound).await {
                log::debug!(
                    "model_version_id {}: statement {} failed: {}",
                    id,
                    i + 1,
                    source
                );
                failures.push(StatementFailure {
                    script: script.name(),
                    index: i + 1,
                    source,
                });
            }
        }

        if failures.is_empty() {
            log::debug!("Copied model_version_id {}", id);
            Ok(())
        } else {
            Err(EtlError::VersionCopy { id, failures })
        }
    }

    /// Every placeholder in the copy script must be the identifier parameter
    fn check_bindings(&self, script: &Script) -> EtlResult<()> {
        let params = [(self.config.migration.id_param.as_str(), 1)];
        let mut parameterized = false;
        for statement in &script.statements {
            parameterized |= bind_params(statement, self.dialect, &params)? != *statement;
        }
        if !parameterized {
            log::warn!(
                "{} never references :{}; every identifier will run the same statements",
                script.name(),
                self.config.migration.id_param
            );
        }
        Ok(())
    }

    /// Identifiers in the new `model_version` table, ascending
    async fn read_ids(&self) -> EtlResult<Vec<ModelVersionId>> {
        let table = self.config.qualify(&self.config.migration.id_table);
        let column = &self.config.migration.id_column;
        let sql = format!("SELECT {column} FROM {table} ORDER BY {column}");

        let raw = self
            .db
            .query_ids(&sql)
            .await
            .map_err(|source| EtlError::ReadIds {
                table: table.clone(),
                source,
            })?;

        let mut ids = raw
            .into_iter()
            .map(|value| {
                ModelVersionId::try_new(value).ok_or_else(|| EtlError::InvalidId {
                    table: table.clone(),
                    value,
                })
            })
            .collect::<EtlResult<Vec<_>>>()?;
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    /// Identifiers recorded as copied by the completion log or the last run summary
    fn previously_copied(
        &self,
        log_path: &Path,
        summary_path: &Path,
    ) -> EtlResult<BTreeSet<ModelVersionId>> {
        let mut ids = BTreeSet::new();
        if let Some(log) = CompletionLog::read(log_path)? {
            log::info!(
                "Resuming: {} ids from {}",
                log.len(),
                log_path.display()
            );
            ids.extend(log.ids());
        }
        if let Some(prior) = RunSummary::load(summary_path)? {
            if prior.target == self.target {
                log::info!(
                    "Resuming: run {} from {}",
                    prior.run_id,
                    summary_path.display()
                );
                ids.extend(prior.copied_ids());
            } else {
                log::warn!(
                    "Ignoring {}: it records run {} against '{}', not '{}'",
                    summary_path.display(),
                    prior.run_id,
                    prior.target,
                    self.target
                );
            }
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "driver_test.rs"]
mod tests;
