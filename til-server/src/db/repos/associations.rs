//! Association manager - acronym/category pivot and user ownership
//!
//! Attach and detach check both ends first so a missing acronym or
//! category reads as 404 rather than a constraint failure. The pivot
//! insert itself relies on `ON CONFLICT DO NOTHING` for uniqueness.

use uuid::Uuid;

use crate::db::{DbError, Storage};
use crate::models::{Acronym, Category};

/// Association repository
pub struct AssociationRepo<'a> {
    storage: &'a dyn Storage,
}

impl<'a> AssociationRepo<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    async fn require_acronym(&self, id: Uuid) -> Result<(), DbError> {
        match self.storage.find_acronym(id).await? {
            Some(_) => Ok(()),
            None => Err(DbError::not_found("acronym", id)),
        }
    }

    async fn require_category(&self, id: Uuid) -> Result<(), DbError> {
        match self.storage.find_category(id).await? {
            Some(_) => Ok(()),
            None => Err(DbError::not_found("category", id)),
        }
    }

    async fn require_user(&self, id: Uuid) -> Result<(), DbError> {
        match self.storage.find_user(id).await? {
            Some(_) => Ok(()),
            None => Err(DbError::not_found("user", id)),
        }
    }

    /// Link a category to an acronym. Linking an existing pair is a no-op.
    pub async fn attach(&self, acronym_id: Uuid, category_id: Uuid) -> Result<(), DbError> {
        self.require_acronym(acronym_id).await?;
        self.require_category(category_id).await?;

        let inserted = match self.storage.link(acronym_id, category_id).await {
            // An end vanished between the check and the insert
            Err(DbError::UnknownReference { resource, id }) => {
                return Err(DbError::NotFound { resource, id })
            }
            other => other?,
        };
        tracing::debug!(%acronym_id, %category_id, inserted, "category attached");
        Ok(())
    }

    /// Unlink a category from an acronym. Succeeds whether or not they were linked.
    pub async fn detach(&self, acronym_id: Uuid, category_id: Uuid) -> Result<(), DbError> {
        self.require_acronym(acronym_id).await?;
        self.require_category(category_id).await?;

        let removed = self.storage.unlink(acronym_id, category_id).await?;
        tracing::debug!(%acronym_id, %category_id, removed, "category detached");
        Ok(())
    }

    pub async fn categories_for_acronym(&self, acronym_id: Uuid) -> Result<Vec<Category>, DbError> {
        self.require_acronym(acronym_id).await?;
        self.storage.categories_of(acronym_id).await
    }

    pub async fn acronyms_for_category(&self, category_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        self.require_category(category_id).await?;
        self.storage.acronyms_in(category_id).await
    }

    /// Acronyms owned by a user (plain foreign key, no pivot).
    pub async fn acronyms_for_user(&self, user_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        self.require_user(user_id).await?;
        self.storage.acronyms_owned_by(user_id).await
    }
}
