//! Acronym endpoints
//!
//! Besides CRUD: exact-match search, first, sorted listing, the owning
//! user, and the category links of each acronym.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{AcronymQuery, AcronymRepo, AssociationRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidQuery, ValidUuid, ValidUuidPair};
use crate::http::server::AppState;
use crate::models::{Acronym, Category, NewAcronym, SearchTerm, User};

/// Create/replace acronym request
#[derive(Deserialize)]
pub struct AcronymRequest {
    pub short: Option<String>,
    pub long: Option<String>,
    #[serde(rename = "userID", alias = "ownerID")]
    pub user_id: Option<Uuid>,
}

impl TryFrom<AcronymRequest> for NewAcronym {
    type Error = ApiError;

    fn try_from(req: AcronymRequest) -> Result<Self, Self::Error> {
        Ok(NewAcronym::new(req.short, req.long, req.user_id)?)
    }
}

/// Query parameters for search
#[derive(Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

/// GET /api/acronyms
async fn list_acronyms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Acronym>>, ApiError> {
    Ok(Json(AcronymRepo::new(state.storage()).list().await?))
}

/// POST /api/acronyms
async fn create_acronym(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<AcronymRequest>,
) -> Result<Json<Acronym>, ApiError> {
    let acronym = AcronymRepo::new(state.storage())
        .create(req.try_into()?)
        .await?;
    Ok(Json(acronym))
}

/// GET /api/acronyms/{id}
async fn get_acronym(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Acronym>, ApiError> {
    Ok(Json(AcronymRepo::new(state.storage()).get(id).await?))
}

/// PUT /api/acronyms/{id} - full replace
async fn update_acronym(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
    ValidJson(req): ValidJson<AcronymRequest>,
) -> Result<Json<Acronym>, ApiError> {
    let acronym = AcronymRepo::new(state.storage())
        .update(id, req.try_into()?)
        .await?;
    Ok(Json(acronym))
}

/// DELETE /api/acronyms/{id}
async fn delete_acronym(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<StatusCode, ApiError> {
    AcronymRepo::new(state.storage()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/acronyms/search?term=X
async fn search_acronyms(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<SearchParams>,
) -> Result<Json<Vec<Acronym>>, ApiError> {
    let term = SearchTerm::new(params.term.as_deref()).map_err(|e| ApiError::BadRequest {
        message: e.to_string(),
    })?;
    Ok(Json(AcronymQuery::new(state.storage()).search(&term).await?))
}

/// GET /api/acronyms/first
async fn first_acronym(State(state): State<Arc<AppState>>) -> Result<Json<Acronym>, ApiError> {
    Ok(Json(AcronymQuery::new(state.storage()).first().await?))
}

/// GET /api/acronyms/sorted
async fn sorted_acronyms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Acronym>>, ApiError> {
    Ok(Json(AcronymQuery::new(state.storage()).sorted_by_short().await?))
}

/// GET /api/acronyms/{id}/user
async fn acronym_user(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<User>, ApiError> {
    Ok(Json(AcronymRepo::new(state.storage()).user(id).await?))
}

/// GET /api/acronyms/{id}/categories
async fn acronym_categories(
    State(state): State<Arc<AppState>>,
    ValidUuid(id): ValidUuid,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = AssociationRepo::new(state.storage())
        .categories_for_acronym(id)
        .await?;
    Ok(Json(categories))
}

/// POST /api/acronyms/{id}/categories/{category_id}
async fn attach_category(
    State(state): State<Arc<AppState>>,
    ValidUuidPair(acronym_id, category_id): ValidUuidPair,
) -> Result<StatusCode, ApiError> {
    AssociationRepo::new(state.storage())
        .attach(acronym_id, category_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /api/acronyms/{id}/categories/{category_id}
async fn detach_category(
    State(state): State<Arc<AppState>>,
    ValidUuidPair(acronym_id, category_id): ValidUuidPair,
) -> Result<StatusCode, ApiError> {
    AssociationRepo::new(state.storage())
        .detach(acronym_id, category_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Acronym routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/acronyms", get(list_acronyms).post(create_acronym))
        .route("/api/acronyms/search", get(search_acronyms))
        .route("/api/acronyms/first", get(first_acronym))
        .route("/api/acronyms/sorted", get(sorted_acronyms))
        .route(
            "/api/acronyms/{id}",
            get(get_acronym).put(update_acronym).delete(delete_acronym),
        )
        .route("/api/acronyms/{id}/user", get(acronym_user))
        .route("/api/acronyms/{id}/categories", get(acronym_categories))
        .route(
            "/api/acronyms/{id}/categories/{category_id}",
            post(attach_category).delete(detach_category),
        )
}

#[cfg(test)]
mod tests {
    use crate::http::test_utils::{
        app, create_acronym, create_category, create_user, id_of, send,
    };
    use axum::http::{Method, StatusCode};
    use serde_json::{json, Value};

    fn shorts(list: &Value) -> Vec<&str> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|a| a["short"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn unknown_owner_is_422() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/acronyms",
            Some(json!({"short": "OMG", "long": "Oh My God", "userID": uuid::Uuid::new_v4()})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "reference_error");
    }

    #[tokio::test]
    async fn missing_owner_is_400() {
        let (app, _) = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/acronyms",
            Some(json!({"short": "OMG", "long": "Oh My God"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "userID is required");
    }

    #[tokio::test]
    async fn search_matches_short_or_long_exactly() {
        let (app, _) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        create_acronym(&app, "OMG", "Oh My God", &alice).await;
        create_acronym(&app, "LOL", "Laugh Out Loud", &alice).await;

        let (status, hits) = send(&app, Method::GET, "/api/acronyms/search?term=OMG", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shorts(&hits), vec!["OMG"]);

        let (_, hits) = send(
            &app,
            Method::GET,
            "/api/acronyms/search?term=Laugh%20Out%20Loud",
            None,
        )
        .await;
        assert_eq!(shorts(&hits), vec!["LOL"]);

        let (_, hits) = send(&app, Method::GET, "/api/acronyms/search?term=OM", None).await;
        assert_eq!(hits, json!([]));
    }

    #[tokio::test]
    async fn search_without_term_is_400() {
        let (app, _) = app();

        for uri in ["/api/acronyms/search", "/api/acronyms/search?term="] {
            let (status, body) = send(&app, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "bad_request");
        }
    }

    #[tokio::test]
    async fn repeated_term_is_400_envelope() {
        let (app, _) = app();
        let (status, body) =
            send(&app, Method::GET, "/api/acronyms/search?term=a&term=b", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn put_missing_long_is_400() {
        let (app, _) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;

        let uri = format!("/api/acronyms/{}", id_of(&omg));
        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({"short": "BRB", "userID": alice["id"]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "long is required");

        let (_, unchanged) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(unchanged, omg);
    }

    #[tokio::test]
    async fn first_and_sorted() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::GET, "/api/acronyms/first", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;
        create_acronym(&app, "BRB", "Be Right Back", &alice).await;
        create_acronym(&app, "LOL", "Laugh Out Loud", &alice).await;

        let (status, first) = send(&app, Method::GET, "/api/acronyms/first", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, omg);

        let (_, sorted) = send(&app, Method::GET, "/api/acronyms/sorted", None).await;
        assert_eq!(shorts(&sorted), vec!["BRB", "LOL", "OMG"]);
    }

    #[tokio::test]
    async fn owner_of_acronym() {
        let (app, _) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;

        let uri = format!("/api/acronyms/{}/user", id_of(&omg));
        let (status, owner) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(owner, alice);
    }

    #[tokio::test]
    async fn attach_and_detach_category() {
        let (app, storage) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;
        let funny = create_category(&app, "Funny").await;

        let link = format!("/api/acronyms/{}/categories/{}", id_of(&omg), id_of(&funny));
        let (status, body) = send(&app, Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Value::Null);

        let categories = format!("/api/acronyms/{}/categories", id_of(&omg));
        let (_, listed) = send(&app, Method::GET, &categories, None).await;
        assert_eq!(listed, json!([funny]));

        let back = format!("/api/categories/{}/acronyms", id_of(&funny));
        let (_, listed) = send(&app, Method::GET, &back, None).await;
        assert_eq!(listed, json!([omg]));

        let (status, _) = send(&app, Method::DELETE, &link, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(storage.pivot_count().await, 0);

        let (_, listed) = send(&app, Method::GET, &categories, None).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn attaching_twice_keeps_one_link() {
        let (app, storage) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;
        let funny = create_category(&app, "Funny").await;

        let link = format!("/api/acronyms/{}/categories/{}", id_of(&omg), id_of(&funny));
        for _ in 0..2 {
            let (status, _) = send(&app, Method::POST, &link, None).await;
            assert_eq!(status, StatusCode::CREATED);
        }
        assert_eq!(storage.pivot_count().await, 1);
    }

    #[tokio::test]
    async fn attach_to_unknown_category_is_404() {
        let (app, _) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;

        let link = format!("/api/acronyms/{}/categories/{}", id_of(&omg), uuid::Uuid::new_v4());
        let (status, _) = send(&app, Method::POST, &link, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let bad = format!("/api/acronyms/{}/categories/nope", id_of(&omg));
        let (status, _) = send(&app, Method::POST, &bad, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_acronym_drops_its_links() {
        let (app, storage) = app();
        let alice = create_user(&app, "Alice", "alicea").await;
        let omg = create_acronym(&app, "OMG", "Oh My God", &alice).await;
        let funny = create_category(&app, "Funny").await;

        let link = format!("/api/acronyms/{}/categories/{}", id_of(&omg), id_of(&funny));
        send(&app, Method::POST, &link, None).await;

        let uri = format!("/api/acronyms/{}", id_of(&omg));
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(storage.pivot_count().await, 0);

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
