//! Structured summary of a migration run
//!
//! Saved after every batch of the incremental phase and at the end of the run,
//! so an interrupted run still leaves a record that `--resume` can pick up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::CoreResult;
use crate::model_version_id::ModelVersionId;

/// Summary of one migration run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique identifier for this run
    pub run_id: String,

    /// Target (environment) the run executed against
    pub target: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the summary was last updated
    pub last_updated_at: DateTime<Utc>,

    /// Current status of the run
    pub status: RunStatus,

    /// Identifiers copied successfully in this run
    pub completed: Vec<ModelVersionId>,

    /// Identifiers whose copy failed
    pub failed: Vec<FailedVersion>,

    /// Identifiers skipped because an earlier run already copied them
    pub skipped: Vec<ModelVersionId>,

    /// Error that aborted the run, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abort_reason: Option<String>,
}

/// Status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Run is in progress (or was interrupted)
    Running,
    /// Every identifier was copied
    Completed,
    /// The run finished but some identifiers failed
    CompletedWithFailures,
    /// A fatal phase failed and the run stopped
    Aborted,
}

/// A model version whose copy failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedVersion {
    pub model_version_id: ModelVersionId,

    /// When the copy failed
    pub failed_at: DateTime<Utc>,

    /// Error message
    pub error: String,
}

impl RunSummary {
    /// Create a summary for a run starting now
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            target: target.into(),
            started_at: Utc::now(),
            last_updated_at: Utc::now(),
            status: RunStatus::Running,
            completed: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            abort_reason: None,
        }
    }

    /// Load a summary from a file path
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let summary: RunSummary = serde_json::from_str(&content)?;
        Ok(Some(summary))
    }

    /// Save the summary atomically
    ///
    /// Uses write-to-temp-then-rename pattern to prevent corruption
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    pub fn mark_completed(&mut self, id: ModelVersionId) {
        self.completed.push(id);
        self.last_updated_at = Utc::now();
    }

    pub fn mark_failed(&mut self, id: ModelVersionId, error: &str) {
        self.failed.push(FailedVersion {
            model_version_id: id,
            failed_at: Utc::now(),
            error: error.to_string(),
        });
        self.last_updated_at = Utc::now();
    }

    pub fn mark_skipped(&mut self, id: ModelVersionId) {
        self.skipped.push(id);
        self.last_updated_at = Utc::now();
    }

    /// Mark the run as finished, choosing the status from the failure count
    pub fn mark_finished(&mut self) {
        self.status = if self.failed.is_empty() {
            RunStatus::Completed
        } else {
            RunStatus::CompletedWithFailures
        };
        self.last_updated_at = Utc::now();
    }

    /// Mark the run as aborted by a fatal error
    pub fn mark_aborted(&mut self, reason: &str) {
        self.status = RunStatus::Aborted;
        self.abort_reason = Some(reason.to_string());
        self.last_updated_at = Utc::now();
    }

    /// Identifiers that are known to be copied: this run's and the ones it skipped
    pub fn copied_ids(&self) -> impl Iterator<Item = ModelVersionId> + '_ {
        self.completed.iter().chain(self.skipped.iter()).copied()
    }

    pub fn failed_ids(&self) -> Vec<ModelVersionId> {
        self.failed.iter().map(|f| f.model_version_id).collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
#[path = "run_summary_test.rs"]
mod tests;
