//! cv-etl - Schema building and data migration for covdb
//!
//! `SchemaBuilder` runs ordered SQL scripts statement by statement.
//! `MigrationDriver` runs the three-phase migration into the `_new` tables:
//! table creation, the bulk `model_version` copy, then the per-identifier
//! `model` copy with failure isolation, batching, and resume.

pub mod driver;
pub mod error;
pub mod records;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use driver::{
    MigrationDriver, MigrationProgress, MigrationReport, MigrationScripts, NoProgress, Phase,
    VersionOutcome,
};
pub use error::{EtlError, EtlResult, StatementFailure};
pub use records::{ModelEstimate, ModelVersion};
pub use schema::{build_database, SchemaBuilder};
