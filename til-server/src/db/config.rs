//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: full connection string, wins over the parts below
//! - `DATABASE_HOSTNAME`: server host (default: localhost)
//! - `DATABASE_PORT`: server port (default: 5432)
//! - `DATABASE_USER`: role name (default: vapor)
//! - `DATABASE_DB`: database name (default: vapor)
//! - `DATABASE_PASSWORD`: role password (default: password)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)

use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Full connection string; overrides the individual parts when present
    pub url: Option<String>,
    pub hostname: String,
    pub port: u16,
    pub username: String,
    pub database: String,
    pub password: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        Self {
            url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            hostname: text("DATABASE_HOSTNAME", "localhost"),
            port: lookup("DATABASE_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5432),
            username: text("DATABASE_USER", "vapor"),
            database: text("DATABASE_DB", "vapor"),
            password: text("DATABASE_PASSWORD", "password"),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
        }
    }

    /// Build sqlx connect options.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is set but is not a valid connection string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match &self.url {
            Some(url) => PgConnectOptions::from_str(url),
            None => Ok(PgConnectOptions::new()
                .host(&self.hostname)
                .port(self.port)
                .username(&self.username)
                .password(&self.password)
                .database(&self.database)),
        }
    }

    /// Where this config points, without the password (for logs)
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_owned(),
            None => format!(
                "{}@{}:{}/{}",
                self.username, self.hostname, self.port, self.database
            ),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
