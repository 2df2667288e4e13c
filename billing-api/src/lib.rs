pub mod config;
pub mod routes;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/billing", post(routes::receive_billing))
        .layer(CorsLayer::permissive())
}
