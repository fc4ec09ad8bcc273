//! In-process storage with the same constraint semantics as PostgreSQL
//!
//! Rows keep insertion order, which stands in for storage-native order.
//! Text ordering is byte-wise, matching the `C` collation.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DbError, Storage};
use crate::models::{Acronym, Category, NewAcronym, NewCategory, NewUser, SearchTerm, User};

#[derive(Debug, Clone, PartialEq, Eq)]
struct PivotRow {
    id: Uuid,
    acronym_id: Uuid,
    category_id: Uuid,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    acronyms: Vec<Acronym>,
    categories: Vec<Category>,
    pivots: Vec<PivotRow>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn acronym(&self, id: Uuid) -> Option<&Acronym> {
        self.acronyms.iter().find(|a| a.id == id)
    }

    fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// Storage kept entirely in memory (tests, `serve --memory`)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pivot rows, for asserting uniqueness.
    pub async fn pivot_count(&self) -> usize {
        self.tables.read().await.pivots.len()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn insert_user(&self, user: NewUser) -> Result<User, DbError> {
        let record = user.into_record(Uuid::new_v4());
        self.tables.write().await.users.push(record.clone());
        Ok(record)
    }

    async fn all_users(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn replace_user(&self, id: Uuid, user: NewUser) -> Result<Option<User>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|row| {
            *row = user.into_record(id);
            row.clone()
        }))
    }

    async fn remove_user(&self, id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        if tables.acronyms.iter().any(|a| a.user_id == id) {
            return Err(DbError::still_referenced("user", id));
        }
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() < before)
    }

    async fn insert_acronym(&self, acronym: NewAcronym) -> Result<Acronym, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(acronym.user_id) {
            return Err(DbError::unknown_reference("user", acronym.user_id));
        }
        let record = acronym.into_record(Uuid::new_v4());
        tables.acronyms.push(record.clone());
        Ok(record)
    }

    async fn all_acronyms(&self) -> Result<Vec<Acronym>, DbError> {
        Ok(self.tables.read().await.acronyms.clone())
    }

    async fn find_acronym(&self, id: Uuid) -> Result<Option<Acronym>, DbError> {
        Ok(self.tables.read().await.acronym(id).cloned())
    }

    async fn replace_acronym(
        &self,
        id: Uuid,
        acronym: NewAcronym,
    ) -> Result<Option<Acronym>, DbError> {
        let mut tables = self.tables.write().await;
        if tables.acronym(id).is_none() {
            return Ok(None);
        }
        if !tables.user_exists(acronym.user_id) {
            return Err(DbError::unknown_reference("user", acronym.user_id));
        }
        Ok(tables.acronyms.iter_mut().find(|a| a.id == id).map(|row| {
            *row = acronym.into_record(id);
            row.clone()
        }))
    }

    async fn remove_acronym(&self, id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.acronyms.len();
        tables.acronyms.retain(|a| a.id != id);
        tables.pivots.retain(|p| p.acronym_id != id);
        Ok(tables.acronyms.len() < before)
    }

    async fn acronyms_owned_by(&self, user_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .acronyms
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn acronyms_matching(&self, term: &SearchTerm) -> Result<Vec<Acronym>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .acronyms
            .iter()
            .filter(|a| term.matches(&a.short) || term.matches(&a.long))
            .cloned()
            .collect())
    }

    async fn first_acronym(&self) -> Result<Option<Acronym>, DbError> {
        Ok(self.tables.read().await.acronyms.first().cloned())
    }

    async fn acronyms_by_short(&self) -> Result<Vec<Acronym>, DbError> {
        let mut acronyms = self.tables.read().await.acronyms.clone();
        acronyms.sort_by(|a, b| a.short.cmp(&b.short));
        Ok(acronyms)
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category, DbError> {
        let record = category.into_record(Uuid::new_v4());
        self.tables.write().await.categories.push(record.clone());
        Ok(record)
    }

    async fn all_categories(&self) -> Result<Vec<Category>, DbError> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DbError> {
        Ok(self.tables.read().await.category(id).cloned())
    }

    async fn replace_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Option<Category>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.iter_mut().find(|c| c.id == id).map(|row| {
            *row = category.into_record(id);
            row.clone()
        }))
    }

    async fn remove_category(&self, id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        tables.pivots.retain(|p| p.category_id != id);
        Ok(tables.categories.len() < before)
    }

    async fn link(&self, acronym_id: Uuid, category_id: Uuid) -> Result<bool, DbError> {
        let mut tables = self.tables.write().await;
        if tables.acronym(acronym_id).is_none() {
            return Err(DbError::unknown_reference("acronym", acronym_id));
        }
        if tables.category(category_id).is_none() {
            return Err(DbError::unknown_reference("category", category_id));
        }
        let linked = tables
            .pivots
            .iter()
            .any(|p| p.acronym_id == acronym_id && p.category_id == category_id);
        if linked {
            return Ok(false);
        }
        tables.pivots.push(PivotRow {
            id: Uuid::new_v4(),
            acronym_id,
            category_id,
        });
        Ok(true)
    }

    async fn unlink(&self, acronym_id: Uuid, category_id: Uuid) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        let before = tables.pivots.len();
        tables
            .pivots
            .retain(|p| !(p.acronym_id == acronym_id && p.category_id == category_id));
        Ok((before - tables.pivots.len()) as u64)
    }

    async fn categories_of(&self, acronym_id: Uuid) -> Result<Vec<Category>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pivots
            .iter()
            .filter(|p| p.acronym_id == acronym_id)
            .filter_map(|p| tables.category(p.category_id).cloned())
            .collect())
    }

    async fn acronyms_in(&self, category_id: Uuid) -> Result<Vec<Acronym>, DbError> {
        let tables = self.tables.read().await;
        Ok(tables
            .pivots
            .iter()
            .filter(|p| p.category_id == category_id)
            .filter_map(|p| tables.acronym(p.acronym_id).cloned())
            .collect())
    }
}
