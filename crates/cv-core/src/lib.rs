//! cv-core - Core library for covdb
//!
//! This crate provides the shared configuration (`covdb.yml`), connection
//! profiles, the completion log, the structured run summary, and the
//! strongly-typed model version identifier used across all covdb crates.

pub mod completion_log;
pub mod config;
pub mod error;
pub mod model_version_id;
pub mod profile;
pub mod run_summary;

pub use completion_log::CompletionLog;
pub use config::{Config, DbType, MigrationConfig, ScriptFormat, ScriptsConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use model_version_id::ModelVersionId;
pub use profile::ConnectionProfile;
pub use run_summary::{FailedVersion, RunStatus, RunSummary};
