//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// covdb - covariate database schema builder and ETL migration tool
#[derive(Parser, Debug)]
#[command(name = "covdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute (default: migrate)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Environment (target in covdb.yml) to run against
    #[arg(long, global = true, env = "COVDB_ENV", default_value = "test")]
    pub prod: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (code root holding scripts and output files)
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the _new tables and migrate data into them
    Migrate(MigrateArgs),

    /// Build the covariate schema and its tables
    BuildSchema(BuildSchemaArgs),

    /// Print the statements a script splits into
    Split(SplitArgs),

    /// Show the completion log and the last run summary
    Status(StatusArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug, Default)]
pub struct MigrateArgs {
    /// Skip model versions an earlier run already copied
    #[arg(long)]
    pub resume: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the build-schema command
#[derive(Args, Debug)]
pub struct BuildSchemaArgs {
    /// Print the scripts that would run without connecting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the split command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Script file to split
    pub script: String,

    /// Statement delimiting convention (default: from covdb.yml, else tokenized)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// SQL dialect used to tokenize
    #[arg(short, long, value_enum, default_value = "mysql")]
    pub dialect: DialectArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: SplitOutput,
}

/// Script formats accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Tokenizer-based splitting
    Tokenized,
    /// Legacy `;--` delimiter convention
    Delimited,
}

/// Dialects accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    Mysql,
    Duckdb,
}

/// Split output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitOutput {
    /// Numbered statements
    Text,
    /// JSON array of statements
    Json,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Also connect to the target and inspect the _new tables
    #[arg(long)]
    pub db: bool,

    /// Output the last run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
