//! Strongly-typed model version identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a row in `model_version`.
///
/// Always positive. Ordering is numeric, which is the order the incremental
/// phase processes identifiers in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ModelVersionId(i64);

impl ModelVersionId {
    /// Create a new `ModelVersionId`, panicking in debug builds if `id` is not positive.
    ///
    /// Prefer [`try_new`](Self::try_new) when handling values read from a database or file.
    pub fn new(id: i64) -> Self {
        debug_assert!(id > 0, "ModelVersionId must be positive");
        Self(id)
    }

    /// Try to create a new `ModelVersionId`, returning `None` unless `id > 0`.
    pub fn try_new(id: i64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    /// Return the raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ModelVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for ModelVersionId {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or_else(|| format!("model_version_id must be positive, got {value}"))
    }
}

impl From<ModelVersionId> for i64 {
    fn from(id: ModelVersionId) -> Self {
        id.0
    }
}

impl FromStr for ModelVersionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|e| format!("'{}' is not an integer: {}", s.trim(), e))?;
        Self::try_from(value)
    }
}

#[cfg(test)]
#[path = "model_version_id_test.rs"]
mod tests;
