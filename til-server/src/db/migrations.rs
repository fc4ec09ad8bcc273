//! Schema migrations
//!
//! Tables are created idempotently, so `run` is safe on every startup.
//! `revert` drops everything in reverse dependency order.

use sqlx::PgPool;

use super::DbError;

/// Statements applied in order by [`run`]
const UP: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL,
        username TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS acronyms (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        seq BIGSERIAL NOT NULL,
        short TEXT NOT NULL,
        long TEXT NOT NULL,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS acronym_category_pivot (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        acronym_id UUID NOT NULL REFERENCES acronyms(id) ON DELETE CASCADE,
        category_id UUID NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        UNIQUE (acronym_id, category_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_acronyms_user_id ON acronyms(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_pivot_category_id ON acronym_category_pivot(category_id)",
];

/// Tables dropped by [`revert`], dependents first
const TABLES: &[&str] = &["acronym_category_pivot", "categories", "acronyms", "users"];

/// Run all migrations inside one transaction.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    let mut tx = pool.begin().await?;
    for statement in UP {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
    }
    tx.commit().await?;

    tracing::info!(statements = UP.len(), "Migrations complete");
    Ok(())
}

/// Drop every table created by [`run`].
pub async fn revert(pool: &PgPool) -> Result<(), DbError> {
    tracing::warn!("Reverting all migrations");

    let mut tx = pool.begin().await?;
    for table in TABLES {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration(e.to_string()))?;
        tracing::debug!(table, "dropped");
    }
    tx.commit().await?;

    Ok(())
}
