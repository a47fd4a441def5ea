//! covdb - covariate database schema builder and ETL migration tool

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, MigrateArgs};
use commands::{build_schema, migrate, split, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match &cli.command {
        None => migrate::execute(&MigrateArgs::default(), &cli.global).await,
        Some(Commands::Migrate(args)) => migrate::execute(args, &cli.global).await,
        Some(Commands::BuildSchema(args)) => build_schema::execute(args, &cli.global).await,
        Some(Commands::Split(args)) => split::execute(args, &cli.global),
        Some(Commands::Status(args)) => status::execute(args, &cli.global).await,
    }
}

/// Route `log` records to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "debug,sqlx=warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
