//! PostgreSQL storage backed by a sqlx pool
//!
//! Every operation is a single statement; constraints do the checking
//! (no check-then-insert).

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{DbError, Storage};
use crate::models::{Acronym, Category, NewAcronym, NewCategory, NewUser, SearchTerm, User};

/// Storage over a PostgreSQL connection pool
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate a foreign-key violation into a domain error, pass anything else through.
fn on_foreign_key(err: sqlx::Error, violation: impl FnOnce() -> DbError) -> DbError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => violation(),
        _ => DbError::Sqlx(err),
    }
}

/// Whether a constraint error names `column` (e.g. `acronym_category_pivot_category_id_fkey`).
fn violates(err: &sqlx::Error, column: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint().is_some_and(|c| c.contains(column)),
        _ => false,
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let user = sqlx::query_as(
            "INSERT INTO users (name, username) VALUES ($1, $2) RETURNING id, name, username",
        )
        .bind(&user.name)
        .bind(&user.username)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn all_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as("SELECT id, name, username FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as("SELECT id, name, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn replace_user(&self, id: Uuid, user: NewUser) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            UPDATE users SET name = $2, username = $3
            WHERE id = $1
            RETURNING id, name, username
            "#,
        )
        .bind(id)
        .bind(&user.name)
        .bind(&user.username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn remove_user(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| on_foreign_key(e, || DbError::still_referenced("user", id)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_acronym(&self, acronym: NewAcronym) -> Result<Acronym, DbError> {
        let owner = acronym.user_id;
        let acronym = sqlx::query_as(
            r#"
            INSERT INTO acronyms (short, long, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, short, long, user_id
            "#,
        )
        .bind(&acronym.short)
        .bind(&acronym.long)
        .bind(acronym.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| on_foreign_key(e, || DbError::unknown_reference("user", owner)))?;
        Ok(acronym)
    }

    async fn all_acronyms(&self) -> Result<Vec<Acronym>, DbError> {
        let acronyms = sqlx::query_as("SELECT id, short, long, user_id FROM acronyms ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        Ok(acronyms)
    }

    async fn find_acronym(&self, id: Uuid) -> Result<Option<Acronym>, DbError> {
        let acronym = sqlx::query_as("SELECT id, short, long, user_id FROM acronyms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(acronym)
    }

    async fn replace_acronym(
        &self,
        id: Uuid,
        acronym: NewAcronym,
    ) -> Result<Option<Acronym>, DbError> {
        let owner = acronym.user_id;
        let acronym = sqlx::query_as(
            r#"
            UPDATE acronyms SET short = $2, long = $3, user_id = $4
            WHERE id = $1
            RETURNING id, short, long, user_id
            "#,
        )
        .bind(id)
        .bind(&acronym.short)
        .bind(&acronym.long)
        .bind(acronym.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| on_foreign_key(e, || DbError::unknown_reference("user", owner)))?;
        Ok(acronym)
    }

    async fn remove_acronym(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM acronyms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn acronyms_owned_by(&self, user_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        let acronyms =
            sqlx::query_as("SELECT id, short, long, user_id FROM acronyms WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(acronyms)
    }

    async fn acronyms_matching(&self, term: &SearchTerm) -> Result<Vec<Acronym>, DbError> {
        let acronyms = sqlx::query_as(
            "SELECT id, short, long, user_id FROM acronyms WHERE short = $1 OR long = $1",
        )
        .bind(term.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(acronyms)
    }

    async fn first_acronym(&self) -> Result<Option<Acronym>, DbError> {
        let acronym = sqlx::query_as("SELECT id, short, long, user_id FROM acronyms ORDER BY seq LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(acronym)
    }

    async fn acronyms_by_short(&self) -> Result<Vec<Acronym>, DbError> {
        let acronyms =
            sqlx::query_as(r#"SELECT id, short, long, user_id FROM acronyms ORDER BY short COLLATE "C" ASC"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(acronyms)
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category, DbError> {
        let category =
            sqlx::query_as("INSERT INTO categories (name) VALUES ($1) RETURNING id, name")
                .bind(&category.name)
                .fetch_one(&self.pool)
                .await?;
        Ok(category)
    }

    async fn all_categories(&self) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as("SELECT id, name FROM categories")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DbError> {
        let category = sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn replace_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Option<Category>, DbError> {
        let category =
            sqlx::query_as("UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id)
                .bind(&category.name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(category)
    }

    async fn remove_category(&self, id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn link(&self, acronym_id: Uuid, category_id: Uuid) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            INSERT INTO acronym_category_pivot (acronym_id, category_id)
            VALUES ($1, $2)
            ON CONFLICT (acronym_id, category_id) DO NOTHING
            "#,
        )
        .bind(acronym_id)
        .bind(category_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "category_id") {
                on_foreign_key(e, || DbError::unknown_reference("category", category_id))
            } else {
                on_foreign_key(e, || DbError::unknown_reference("acronym", acronym_id))
            }
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn unlink(&self, acronym_id: Uuid, category_id: Uuid) -> Result<u64, DbError> {
        let result = sqlx::query(
            "DELETE FROM acronym_category_pivot WHERE acronym_id = $1 AND category_id = $2",
        )
        .bind(acronym_id)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn categories_of(&self, acronym_id: Uuid) -> Result<Vec<Category>, DbError> {
        let categories = sqlx::query_as(
            r#"
            SELECT c.id, c.name
            FROM categories c
            JOIN acronym_category_pivot p ON p.category_id = c.id
            WHERE p.acronym_id = $1
            "#,
        )
        .bind(acronym_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn acronyms_in(&self, category_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        let acronyms = sqlx::query_as(
            r#"
            SELECT a.id, a.short, a.long, a.user_id
            FROM acronyms a
            JOIN acronym_category_pivot p ON p.acronym_id = a.id
            WHERE p.category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(acronyms)
    }
}
