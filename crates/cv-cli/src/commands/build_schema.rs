//! Build-schema command implementation

use anyhow::{Context, Result};
use cv_etl::build_database;

use super::common::{Project, Session};
use crate::cli::{BuildSchemaArgs, GlobalArgs};

/// Execute the build-schema command
pub async fn execute(args: &BuildSchemaArgs, global: &GlobalArgs) -> Result<()> {
    let project = Project::load(global)?;
    let scripts = project.config.schema_build_scripts(&project.root);

    if args.dry_run {
        println!("Would run {} scripts:", scripts.len());
        for script in &scripts {
            println!("  {}", script.display());
        }
        return Ok(());
    }

    let session = Session::open(&project, global).await?;
    let executed = build_database(
        session.db.as_ref(),
        &project.config,
        &project.root,
        session.dialect.as_ref(),
    )
    .await
    .context("Failed to build the covariate database")?;

    println!(
        "Built covariate database on '{}': {} scripts, {} statements",
        global.prod,
        scripts.len(),
        executed
    );
    Ok(())
}
