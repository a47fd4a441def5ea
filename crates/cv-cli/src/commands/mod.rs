//! CLI command implementations

pub(crate) mod build_schema;
pub(crate) mod common;
pub(crate) mod migrate;
pub(crate) mod progress;
pub(crate) mod split;
pub(crate) mod status;
