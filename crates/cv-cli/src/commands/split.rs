//! Split command implementation

use anyhow::{Context, Result};
use cv_core::{Config, ScriptFormat};
use cv_sql::{DuckDbDialect, MySqlDialect, Script, SqlDialect};
use std::path::Path;

use crate::cli::{DialectArg, FormatArg, GlobalArgs, SplitArgs, SplitOutput};

/// Execute the split command
pub fn execute(args: &SplitArgs, global: &GlobalArgs) -> Result<()> {
    let format = match args.format {
        Some(FormatArg::Tokenized) => ScriptFormat::Tokenized,
        Some(FormatArg::Delimited) => ScriptFormat::Delimited,
        None => configured_format(global),
    };
    let dialect: Box<dyn SqlDialect> = match args.dialect {
        DialectArg::Mysql => Box::new(MySqlDialect::new()),
        DialectArg::Duckdb => Box::new(DuckDbDialect::new()),
    };

    let script = Script::load(Path::new(&args.script), format, dialect.as_ref())
        .with_context(|| format!("Failed to split {}", args.script))?;

    match args.output {
        SplitOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&script.statements)?);
        }
        SplitOutput::Text => {
            println!(
                "{}: {} statements ({} format)",
                script.name(),
                script.statements.len(),
                format
            );
            for (i, statement) in script.statements.iter().enumerate() {
                println!("\n-- [{}]\n{}", i + 1, statement);
            }
        }
    }

    Ok(())
}

/// Script format from the project config, when one can be loaded
fn configured_format(global: &GlobalArgs) -> ScriptFormat {
    let loaded = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(Path::new(&global.project_dir)),
    };
    match loaded {
        Ok(config) => config.script_format,
        Err(e) => {
            if global.verbose {
                eprintln!("[verbose] No usable config ({}), using tokenized format", e);
            }
            ScriptFormat::default()
        }
    }
}
