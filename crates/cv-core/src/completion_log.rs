//! Completion log: the record of model versions copied before a run stopped.
//!
//! Layout is a fixed header line followed by one identifier per line:
//!
//! ```text
//! model_versions completed:
//! 3
//! 17
//! ```

use crate::error::{CoreError, CoreResult};
use crate::model_version_id::ModelVersionId;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Header line written at the top of every completion log
pub const COMPLETION_LOG_HEADER: &str = "model_versions completed:";

/// Identifiers successfully migrated, kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLog {
    completed: BTreeSet<ModelVersionId>,
}

impl CompletionLog {
    /// Build a log from completed identifiers
    pub fn new(completed: impl IntoIterator<Item = ModelVersionId>) -> Self {
        Self {
            completed: completed.into_iter().collect(),
        }
    }

    /// Read a log from disk, returning `None` if the file does not exist
    pub fn read(path: &Path) -> CoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse(&content, path).map(Some)
    }

    fn parse(content: &str, path: &Path) -> CoreResult<Self> {
        let malformed = |line: usize, reason: String| CoreError::CompletionLogParse {
            path: path.display().to_string(),
            line,
            reason,
        };

        let mut lines = content.lines().enumerate();
        match lines.next() {
            Some((_, header)) if header.trim() == COMPLETION_LOG_HEADER => {}
            Some((_, other)) => {
                return Err(malformed(1, format!("expected header, found '{}'", other)))
            }
            None => return Err(malformed(1, "file is empty".to_string())),
        }

        let mut completed = BTreeSet::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let id = line.parse::<ModelVersionId>().map_err(|e| malformed(idx + 1, e))?;
            completed.insert(id);
        }

        Ok(Self { completed })
    }

    /// Write the log, replacing any previous file at `path`
    pub fn write(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = String::with_capacity(COMPLETION_LOG_HEADER.len() + self.completed.len() * 8);
        out.push_str(COMPLETION_LOG_HEADER);
        out.push('\n');
        for id in &self.completed {
            out.push_str(&id.to_string());
            out.push('\n');
        }

        fs::write(path, out).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    /// Completed identifiers in ascending order
    pub fn ids(&self) -> impl Iterator<Item = ModelVersionId> + '_ {
        self.completed.iter().copied()
    }
}

#[cfg(test)]
#[path = "completion_log_test.rs"]
mod tests;
