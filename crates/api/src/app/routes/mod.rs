use axum::Router;

pub mod inventory;
pub mod preferences;
pub mod profiles;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/profiles", profiles::router())
        .nest("/preferences", preferences::router())
        .nest("/inventory", inventory::router())
}
