//! SQL script files loaded and split into statements

use cv_core::ScriptFormat;
use std::path::{Path, PathBuf};

use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::splitter::split_with_format;

/// A script file and the statements it contains, in order
#[derive(Debug, Clone)]
pub struct Script {
    /// Where the script was read from
    pub path: PathBuf,

    /// Executable statements
    pub statements: Vec<String>,
}

impl Script {
    /// Read and split a script file
    pub fn load(path: &Path, format: ScriptFormat, dialect: &dyn SqlDialect) -> SqlResult<Self> {
        let sql = std::fs::read_to_string(path).map_err(|e| SqlError::ScriptRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let statements = split_with_format(&sql, format, dialect)?;
        if statements.is_empty() {
            log::warn!("Script {} contains no statements", path.display());
        } else {
            log::debug!(
                "Loaded {} statements from {} ({} format)",
                statements.len(),
                path.display(),
                format
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            statements,
        })
    }

    /// Load several scripts, preserving order
    pub fn load_all(
        paths: &[PathBuf],
        format: ScriptFormat,
        dialect: &dyn SqlDialect,
    ) -> SqlResult<Vec<Self>> {
        paths
            .iter()
            .map(|p| Self::load(p, format, dialect))
            .collect()
    }

    /// File name for messages, falling back to the full path
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
