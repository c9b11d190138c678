use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cookgenie_core::ProfileId;
use cookgenie_profiles::{NewProfile, ProfilePatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_profile).get(list_profiles))
        .route("/:id", get(get_profile).put(update_profile).delete(delete_profile))
}

pub async fn create_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewProfile>,
) -> axum::response::Response {
    match services.create_profile(body) {
        Ok(profile) => (StatusCode::CREATED, Json(dto::profile_to_json(&profile))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_profiles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let profiles: Vec<serde_json::Value> = services
        .list_profiles()
        .iter()
        .map(dto::profile_to_json)
        .collect();

    (StatusCode::OK, Json(profiles)).into_response()
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProfileId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_profile(id) {
        Ok(profile) => (StatusCode::OK, Json(dto::profile_to_json(&profile))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ProfilePatch>,
) -> axum::response::Response {
    let id: ProfileId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update_profile(id, body) {
        Ok(profile) => (StatusCode::OK, Json(dto::profile_to_json(&profile))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProfileId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.delete_profile(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
