//! til CLI - run and administer the acronym API
//!
//! - `serve`: run migrations, then the HTTP server
//! - `migrate`: apply the schema and exit
//! - `revert`: drop every table (requires `--yes`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "til",
    author,
    version,
    about = "REST API for acronyms, their owners and categories"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still wins)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply database migrations and exit
    Migrate(commands::migrate::MigrateArgs),
    /// Drop all tables created by migrate
    Revert(commands::revert::RevertArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Revert(args) => commands::run_revert(args).await?,
    }
    Ok(())
}
