//! Terminal progress for migration runs

use cv_core::ModelVersionId;
use cv_etl::{MigrationProgress, Phase, VersionOutcome};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Renders migration progress: a line per phase and a bar over the
/// model versions of the incremental phase
pub(crate) struct BarProgress {
    quiet: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: Mutex::new(None),
        }
    }

    /// Clear the bar once the run is over
    pub fn finish(&self) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                f(pb);
            }
        }
    }
}

impl MigrationProgress for BarProgress {
    fn phase_started(&self, phase: Phase) {
        if !self.quiet {
            println!("Running {}...", phase);
        }
    }

    fn versions_resolved(&self, pending: usize, skipped: usize) {
        if self.quiet {
            return;
        }
        if skipped > 0 {
            println!("Skipping {} model versions copied by an earlier run", skipped);
        }

        let pb = ProgressBar::new(pending as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn version_finished(&self, id: ModelVersionId, outcome: &VersionOutcome) {
        self.with_bar(|pb| {
            if let VersionOutcome::Failed(error) = outcome {
                pb.println(format!("[warn] model_version_id {} failed: {}", id, error));
            }
            pb.set_message(format!("model_version_id {}", id));
            pb.inc(1);
        });
    }
}
