//! Error types for cv-etl

use cv_core::{CoreError, ModelVersionId};
use cv_db::DbError;
use cv_sql::SqlError;
use thiserror::Error;

/// A statement of a script that the database rejected
#[derive(Error, Debug)]
#[error("statement {index} of {script} failed: {source}")]
pub struct StatementFailure {
    /// Script file name
    pub script: String,

    /// 1-based position of the statement in the script
    pub index: usize,

    #[source]
    pub source: DbError,
}

/// Migration and schema build errors
#[derive(Error, Debug)]
pub enum EtlError {
    /// Creating the target tables failed (X001)
    #[error("[X001] Schema creation failed: {0}")]
    SchemaCreation(#[source] StatementFailure),

    /// The bulk `model_version` copy failed (X002)
    #[error("[X002] Bulk copy failed: {0}")]
    BulkCopy(#[source] StatementFailure),

    /// The identifier list could not be read (X003)
    #[error("[X003] Failed to read identifiers from {table}: {source}")]
    ReadIds {
        table: String,
        #[source]
        source: DbError,
    },

    /// The identifier table holds a value that is not a valid identifier (X004)
    #[error("[X004] Invalid model_version_id {value} in {table}")]
    InvalidId { table: String, value: i64 },

    /// A result row could not be decoded into a record (X005)
    #[error("[X005] Failed to decode column '{column}': {reason}")]
    Decode { column: String, reason: String },

    /// Building the full database failed (X006)
    #[error("[X006] Database build failed: {0}")]
    Build(#[source] StatementFailure),

    /// One or more statements failed while copying an identifier (X007)
    #[error("[X007] Copy of model_version_id {id} failed: {}", join_failures(.failures))]
    VersionCopy {
        id: ModelVersionId,
        failures: Vec<StatementFailure>,
    },

    #[error(transparent)]
    Sql(#[from] SqlError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for EtlError
pub type EtlResult<T> = Result<T, EtlError>;

fn join_failures(failures: &[StatementFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
