//! User repository

use uuid::Uuid;

use crate::db::{DbError, Storage};
use crate::models::{NewUser, User};

const RESOURCE: &str = "user";

/// User repository
pub struct UserRepo<'a> {
    storage: &'a dyn Storage,
}

impl<'a> UserRepo<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    /// Insert a new user, returning it with its generated id.
    pub async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let user = self.storage.insert_user(user).await?;
        tracing::debug!(id = %user.id, "user created");
        Ok(user)
    }

    /// All users in storage order.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        self.storage.all_users().await
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DbError> {
        self.storage
            .find_user(id)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    /// Replace name and username.
    pub async fn update(&self, id: Uuid, user: NewUser) -> Result<User, DbError> {
        let user = self
            .storage
            .replace_user(id, user)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::debug!(%id, "user replaced");
        Ok(user)
    }

    /// Delete a user. Fails with `StillReferenced` while it owns acronyms.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        if !self.storage.remove_user(id).await? {
            return Err(DbError::not_found(RESOURCE, id));
        }
        tracing::debug!(%id, "user deleted");
        Ok(())
    }
}
