//! Shared command helpers: config loading and target resolution

use anyhow::{Context, Result};
use cv_core::{Config, TargetConfig};
use cv_db::Database;
use cv_sql::{dialect_for, SqlDialect};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Loaded configuration and the code root everything resolves against
pub(crate) struct Project {
    pub config: Config,
    pub root: PathBuf,
}

impl Project {
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&global.project_dir);
        let config = match &global.config {
            Some(path) => Config::load(Path::new(path)),
            None => Config::load_from_dir(&root),
        }
        .context("Failed to load covdb configuration")?;

        if global.verbose {
            eprintln!(
                "[verbose] Loaded project '{}' from {}",
                config.name,
                root.display()
            );
        }

        Ok(Self { config, root })
    }

    /// Target for the selected environment, with paths resolved against the root
    pub fn target(&self, env: &str) -> Result<TargetConfig> {
        let target = self
            .config
            .target(env)
            .with_context(|| format!("Unknown environment '{}'", env))?;
        Ok(target.resolved(&self.root))
    }
}

/// An open session on the selected target
pub(crate) struct Session {
    pub db: Arc<dyn Database>,
    pub dialect: Box<dyn SqlDialect>,
}

impl Session {
    pub async fn open(project: &Project, global: &GlobalArgs) -> Result<Self> {
        let target = project.target(&global.prod)?;
        let db = cv_db::connect(&target)
            .await
            .with_context(|| format!("Failed to connect to '{}'", global.prod))?;

        if global.verbose {
            eprintln!(
                "[verbose] Connected to '{}' ({})",
                global.prod,
                db.db_type()
            );
        }

        Ok(Self {
            db,
            dialect: dialect_for(target.db_type),
        })
    }
}
