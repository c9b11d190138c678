use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cookgenie_core::ProfileId;
use cookgenie_profiles::{NewPreferences, PreferencesPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Preferences are addressed by the owning profile's id.
pub fn router() -> Router {
    Router::new()
        .route("/", post(create_preferences))
        .route(
            "/:profile_id",
            get(get_preferences)
                .put(update_preferences)
                .delete(delete_preferences),
        )
}

pub async fn create_preferences(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewPreferences>,
) -> axum::response::Response {
    match services.create_preferences(body) {
        Ok(prefs) => (StatusCode::CREATED, Json(dto::preferences_to_json(&prefs))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_preferences(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_preferences(profile_id) {
        Ok(prefs) => (StatusCode::OK, Json(dto::preferences_to_json(&prefs))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_preferences(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
    Json(body): Json<PreferencesPatch>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update_preferences(profile_id, body) {
        Ok(prefs) => (StatusCode::OK, Json(dto::preferences_to_json(&prefs))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_preferences(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.delete_preferences(profile_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
