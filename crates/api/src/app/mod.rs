//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store + clock wiring and the profile, preference and
//!   inventory use cases
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: query DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
