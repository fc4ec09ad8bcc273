//! HTTP server command
//!
//! Runs migrations, then serves the acronym API until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use til_server::db::{migrations, MemoryStorage, PgStorage, Storage};
use til_server::http::{run_server, ServerConfig};

use super::db::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep everything in memory instead of PostgreSQL (lost on exit)
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let storage: Arc<dyn Storage> = if args.memory {
        tracing::warn!("Using in-memory storage; data is lost on exit");
        Arc::new(MemoryStorage::new())
    } else {
        let pool = args.db.connect().await?;
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
        Arc::new(PgStorage::new(pool))
    };

    tracing::info!("Starting til server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(storage, config).await.context("Server error")?;

    Ok(())
}
