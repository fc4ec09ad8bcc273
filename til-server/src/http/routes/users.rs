//! User endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{AssociationRepo, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidUuid};
use crate::http::server::AppState;
use crate::models::{Acronym, NewUser, User};

/// Create/replace user request. Any `id` in the body is ignored.
#[derive(Deserialize)]
pub struct UserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
}

impl TryFrom<UserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(req: UserRequest) -> Result<Self, Self::Error> {
        Ok(NewUser::new(req.name, req.username)?)
    }
}

/// GET /api/users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(UserRepo::new(state.storage()).list().await?))
}

/// POST /api/users
async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(state.storage()).create(req.try_into()?).await?;
    Ok(Json(user))
}

/// GET /api/users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<User>, ApiError> {
    Ok(Json(UserRepo::new(state.storage()).get(id).await?))
}

/// PUT /api/users/{id} - full replace
async fn update_user(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<UserRequest>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepo::new(state.storage())
        .update(id, req.try_into()?)
        .await?;
    Ok(Json(user))
}

/// DELETE /api/users/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    UserRepo::new(state.storage()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{id}/acronyms
async fn user_acronyms(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Vec<Acronym>>, ApiError> {
    let acronyms = AssociationRepo::new(state.storage())
        .acronyms_for_user(id)
        .await?;
    Ok(Json(acronyms))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/acronyms", get(user_acronyms))
}
