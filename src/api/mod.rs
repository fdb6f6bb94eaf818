pub mod analyze;
pub mod insights;
pub mod models;

// Re-exports
pub use models::*;

use axum::{routing::get, Json, Router};
use tower_http::trace::TraceLayer;

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the HTTP router with all endpoints
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .merge(analyze::routes())
        .merge(insights::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
