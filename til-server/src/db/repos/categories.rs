//! Category repository

use uuid::Uuid;

use crate::db::{DbError, Storage};
use crate::models::{Category, NewCategory};

const RESOURCE: &str = "category";

/// Category repository
pub struct CategoryRepo<'a> {
    storage: &'a dyn Storage,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub async fn create(&self, category: NewCategory) -> Result<Category, DbError> {
        let category = self.storage.insert_category(category).await?;
        tracing::debug!(id = %category.id, "category created");
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        self.storage.all_categories().await
    }

    pub async fn get(&self, id: Uuid) -> Result<Category, DbError> {
        self.storage
            .find_category(id)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))
    }

    pub async fn update(&self, id: Uuid, category: NewCategory) -> Result<Category, DbError> {
        let category = self
            .storage
            .replace_category(id, category)
            .await?
            .ok_or_else(|| DbError::not_found(RESOURCE, id))?;
        tracing::debug!(%id, "category replaced");
        Ok(category)
    }

    /// Delete a category; its pivot rows go with it.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        if !self.storage.remove_category(id).await? {
            return Err(DbError::not_found(RESOURCE, id));
        }
        tracing::debug!(%id, "category deleted");
        Ok(())
    }
}
