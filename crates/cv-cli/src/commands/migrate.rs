//! Migrate command implementation

use anyhow::{Context, Result};
use cv_etl::{MigrationDriver, MigrationScripts};

use super::common::{Project, Session};
use super::progress::BarProgress;
use crate::cli::{GlobalArgs, MigrateArgs};

/// Execute the migrate command
pub async fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let session = Session::open(&project, global).await?;

    let scripts = MigrationScripts::load(&project.config, &project.root, session.dialect.as_ref())
        .context("Failed to load migration scripts")?;

    if global.verbose {
        eprintln!(
            "[verbose] {} table scripts, {} bulk copy statements, {} per-version statements",
            scripts.etl_tables.len(),
            scripts.model_version_copy.statements.len(),
            scripts.model_copy.statements.len()
        );
    }

    let progress = BarProgress::new(args.quiet);
    let result = MigrationDriver::new(
        session.db.as_ref(),
        session.dialect.as_ref(),
        &project.config,
        &project.root,
    )
    .with_target(global.prod.as_str())
    .with_resume(args.resume)
    .with_progress(&progress)
    .run(&scripts)
    .await;
    progress.finish();

    let report = result.context("Migration aborted")?;
    let summary = &report.summary;

    println!();
    println!(
        "Migration finished on '{}': {} copied, {} failed, {} skipped",
        global.prod,
        summary.completed.len(),
        summary.failed.len(),
        summary.skipped.len()
    );

    for failure in &summary.failed {
        println!("  failed {}: {}", failure.model_version_id, failure.error);
    }

    if let Some(path) = &report.completion_log {
        println!("Completed model versions written to {}", path.display());
        eprintln!("[warn] Re-run with --resume to retry the failed model versions");
    }
    println!("Run summary written to {}", report.summary_path.display());

    Ok(())
}
