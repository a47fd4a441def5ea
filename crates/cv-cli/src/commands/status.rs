//! Status command implementation

use anyhow::{Context, Result};
use cv_core::{CompletionLog, RunStatus, RunSummary};
use cv_db::Database;

use super::common::{Project, Session};
use crate::cli::{GlobalArgs, StatusArgs};

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let config = &project.config;

    let summary_path = config.results_path(&project.root, &global.prod);
    let summary = RunSummary::load(&summary_path)
        .with_context(|| format!("Failed to read {}", summary_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match &summary {
        Some(summary) => {
            println!(
                "Last run {} on '{}': {} (started {})",
                summary.run_id,
                summary.target,
                status_label(summary.status),
                summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!(
                "  {} copied, {} failed, {} skipped",
                summary.completed.len(),
                summary.failed.len(),
                summary.skipped.len()
            );
            for failure in &summary.failed {
                println!("  failed {}: {}", failure.model_version_id, failure.error);
            }
            if let Some(reason) = &summary.abort_reason {
                println!("  aborted: {}", reason);
            }
        }
        None => println!("No run summary at {}", summary_path.display()),
    }

    let log_path = config.completion_log_path(&project.root, &global.prod);
    match CompletionLog::read(&log_path)
        .with_context(|| format!("Failed to read {}", log_path.display()))?
    {
        Some(log) if log.is_empty() => {
            println!("Completion log {}: no model versions", log_path.display())
        }
        Some(log) => println!(
            "Completion log {}: {} model versions",
            log_path.display(),
            log.len()
        ),
        None => println!("No completion log at {}", log_path.display()),
    }

    if args.db {
        let session = Session::open(&project, global).await?;
        let table = config.qualify(&config.migration.id_table);
        if session.db.relation_exists(&table).await? {
            let count = session
                .db
                .query_count(&format!("SELECT * FROM {}", table))
                .await?;
            println!("{}: {} model versions", table, count);
        } else {
            println!("{}: not created yet", table);
        }
    }

    Ok(())
}

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Running => "running (interrupted?)",
        RunStatus::Completed => "completed",
        RunStatus::CompletedWithFailures => "completed with failures",
        RunStatus::Aborted => "aborted",
    }
}
