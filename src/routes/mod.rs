use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

pub mod dishes;
pub mod health;
pub mod metrics;

/// Form submissions are a handful of short fields.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Build the application routes (everything except `/metrics`).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dishes::show_form).post(dishes::submit_form))
        .route("/health", get(health::health_check))
        .route("/api/v1/dishes", post(dishes::submit_dish))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}
