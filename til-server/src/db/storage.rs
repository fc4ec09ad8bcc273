//! Storage gateway trait
//!
//! The relational capabilities the repositories need: insert, filter,
//! sort, first, all, replace, delete, and joins through the pivot.
//! Implementations must report constraint outcomes the same way:
//! - a dangling `user_id` on an acronym is `DbError::UnknownReference`
//! - removing a user that still owns acronyms is `DbError::StillReferenced`
//! - pivot rows disappear with their acronym or category
//! - a pivot pair exists at most once

use async_trait::async_trait;
use uuid::Uuid;

use super::DbError;
use crate::models::{Acronym, Category, NewAcronym, NewCategory, NewUser, SearchTerm, User};

/// Storage gateway (testable)
#[async_trait]
pub trait Storage: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, DbError>;
    async fn all_users(&self) -> Result<Vec<User>, DbError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, DbError>;
    /// Overwrite every mutable field; `None` when no row has `id`.
    async fn replace_user(&self, id: Uuid, user: NewUser) -> Result<Option<User>, DbError>;
    /// `false` when no row had `id`.
    async fn remove_user(&self, id: Uuid) -> Result<bool, DbError>;

    async fn insert_acronym(&self, acronym: NewAcronym) -> Result<Acronym, DbError>;
    async fn all_acronyms(&self) -> Result<Vec<Acronym>, DbError>;
    async fn find_acronym(&self, id: Uuid) -> Result<Option<Acronym>, DbError>;
    async fn replace_acronym(&self, id: Uuid, acronym: NewAcronym)
        -> Result<Option<Acronym>, DbError>;
    async fn remove_acronym(&self, id: Uuid) -> Result<bool, DbError>;
    async fn acronyms_owned_by(&self, user_id: Uuid) -> Result<Vec<Acronym>, DbError>;
    /// Acronyms whose short or long form equals the term.
    async fn acronyms_matching(&self, term: &SearchTerm) -> Result<Vec<Acronym>, DbError>;
    async fn first_acronym(&self) -> Result<Option<Acronym>, DbError>;
    async fn acronyms_by_short(&self) -> Result<Vec<Acronym>, DbError>;

    async fn insert_category(&self, category: NewCategory) -> Result<Category, DbError>;
    async fn all_categories(&self) -> Result<Vec<Category>, DbError>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, DbError>;
    async fn replace_category(
        &self,
        id: Uuid,
        category: NewCategory,
    ) -> Result<Option<Category>, DbError>;
    async fn remove_category(&self, id: Uuid) -> Result<bool, DbError>;

    /// Insert a pivot row; `false` when the pair was already linked.
    async fn link(&self, acronym_id: Uuid, category_id: Uuid) -> Result<bool, DbError>;
    /// Delete matching pivot rows, returning how many went.
    async fn unlink(&self, acronym_id: Uuid, category_id: Uuid) -> Result<u64, DbError>;
    async fn categories_of(&self, acronym_id: Uuid) -> Result<Vec<Category>, DbError>;
    async fn acronyms_in(&self, category_id: Uuid) -> Result<Vec<Acronym>, DbError>;
}
