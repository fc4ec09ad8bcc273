//! Apply schema migrations and exit

use anyhow::{Context, Result};
use clap::Parser;

use til_server::db::migrations;

use super::db::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.db.connect().await?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations applied");
    Ok(())
}
