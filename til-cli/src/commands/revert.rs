//! Drop every table created by `migrate`

use anyhow::{bail, Context, Result};
use clap::Parser;

use til_server::db::migrations;

use super::db::DbArgs;

/// Arguments for the revert command
#[derive(Parser, Debug)]
pub struct RevertArgs {
    /// Confirm dropping all tables and their data
    #[arg(long)]
    pub yes: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

pub async fn run_revert(args: RevertArgs) -> Result<()> {
    if !args.yes {
        bail!("revert drops all tables and data; pass --yes to confirm");
    }

    let pool = args.db.connect().await?;
    migrations::revert(&pool)
        .await
        .context("Failed to revert migrations")?;

    tracing::info!("All tables dropped");
    Ok(())
}
