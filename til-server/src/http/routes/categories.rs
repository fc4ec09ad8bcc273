//! Category endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{AssociationRepo, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUuid};
use crate::http::server::AppState;
use crate::models::{Acronym, Category, NewCategory};

/// Create/replace category request
#[derive(Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

/// GET /api/categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(CategoryRepo::new(state.storage()).list().await?))
}

/// POST /api/categories
async fn create_category(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let category = NewCategory::new(req.name)?;
    Ok(Json(CategoryRepo::new(state.storage()).create(category).await?))
}

/// GET /api/categories/{id}
async fn get_category(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Category>, ApiError> {
    Ok(Json(CategoryRepo::new(state.storage()).get(id).await?))
}

/// PUT /api/categories/{id} - full replace
async fn update_category(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    let category = NewCategory::new(req.name)?;
    Ok(Json(
        CategoryRepo::new(state.storage()).update(id, category).await?,
    ))
}

/// DELETE /api/categories/{id}
async fn delete_category(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    CategoryRepo::new(state.storage()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/categories/{id}/acronyms
async fn category_acronyms(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Vec<Acronym>>, ApiError> {
    let acronyms = AssociationRepo::new(state.storage())
        .acronyms_for_category(id)
        .await?;
    Ok(Json(acronyms))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/api/categories/{id}/acronyms", get(category_acronyms))
}
