use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cookgenie_core::{InventoryItemId, ProfileId};
use cookgenie_inventory::{
    DEFAULT_LOW_STOCK_THRESHOLD, InventoryItemPatch, NewInventoryItem, build_alert_list, low_stock,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_item))
        .route("/profile/:profile_id", get(list_items))
        .route("/profile/:profile_id/expiry-alerts", get(get_expiry_alerts))
        .route("/profile/:profile_id/low-stock", get(get_low_stock))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<NewInventoryItem>,
) -> axum::response::Response {
    match services.create_item(body) {
        Ok(item) => (
            StatusCode::CREATED,
            Json(dto::item_to_json(&item, services.today(), services.reference_offset())),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let (today, tz) = (services.today(), services.reference_offset());
    let items: Vec<serde_json::Value> = services
        .list_items(profile_id)
        .iter()
        .map(|item| dto::item_to_json(item, today, tz))
        .collect();

    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.get_item(id) {
        Ok(item) => (
            StatusCode::OK,
            Json(dto::item_to_json(&item, services.today(), services.reference_offset())),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<InventoryItemPatch>,
) -> axum::response::Response {
    let id: InventoryItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.update_item(id, body) {
        Ok(item) => (
            StatusCode::OK,
            Json(dto::item_to_json(&item, services.today(), services.reference_offset())),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryItemId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.delete_item(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_expiry_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
    Query(query): Query<dto::AlertsQuery>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let (today, tz) = (services.today(), services.reference_offset());
    let items = services.list_items(profile_id);
    let list = build_alert_list(&items, today, tz);

    tracing::debug!(
        profile_id = %profile_id,
        alerts = list.len(),
        skipped = list.diagnostics.len(),
        "expiry alerts computed"
    );

    (
        StatusCode::OK,
        Json(dto::alert_list_to_json(&list, query.limit, today, tz)),
    )
        .into_response()
}

pub async fn get_low_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(profile_id): Path<String>,
    Query(query): Query<dto::LowStockQuery>,
) -> axum::response::Response {
    let profile_id: ProfileId = match errors::parse_id(&profile_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let threshold = query.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);
    let (today, tz) = (services.today(), services.reference_offset());
    let items = services.list_items(profile_id);

    match low_stock(&items, threshold) {
        Ok(low) => (
            StatusCode::OK,
            Json(
                low.into_iter()
                    .map(|item| dto::item_to_json(item, today, tz))
                    .collect::<Vec<_>>(),
            ),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
