//! Shared database flags
//!
//! Text flags fall back to their environment variable. Numeric flags are
//! flag-only; their environment variables are read by
//! [`DatabaseConfig::from_env`], where malformed values fall back to the defaults.

use anyhow::{Context, Result};
use clap::Args;
use sqlx::PgPool;

use til_server::db::{create_pool, DatabaseConfig};

/// Database connection flags
#[derive(Args, Debug, Default, Clone)]
pub struct DbArgs {
    /// Database URL (overrides the individual connection flags)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DATABASE_HOSTNAME")]
    pub db_host: Option<String>,

    /// Database port (else DATABASE_PORT)
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Database role
    #[arg(long, env = "DATABASE_USER")]
    pub db_user: Option<String>,

    /// Database name
    #[arg(long, env = "DATABASE_DB")]
    pub db_name: Option<String>,

    /// Maximum pool connections (else DATABASE_MAX_CONNECTIONS)
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl DbArgs {
    /// Layer the flags over the environment-derived config.
    ///
    /// The password is only read from `DATABASE_PASSWORD`.
    pub fn config(&self) -> DatabaseConfig {
        let mut config = DatabaseConfig::from_env();

        if let Some(url) = self.database_url.clone().filter(|u| !u.is_empty()) {
            config.url = Some(url);
        }
        if let Some(host) = &self.db_host {
            config.hostname = host.clone();
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(user) = &self.db_user {
            config.username = user.clone();
        }
        if let Some(name) = &self.db_name {
            config.database = name.clone();
        }
        if let Some(max) = self.max_connections.filter(|n| *n > 0) {
            config.max_connections = max;
        }

        config
    }

    /// Connect a pool for these flags.
    pub async fn connect(&self) -> Result<PgPool> {
        let config = self.config();
        tracing::info!(database = %config.describe(), "Connecting to database");

        create_pool(&config)
            .await
            .with_context(|| format!("Failed to connect to {}", config.describe()))
    }
}
