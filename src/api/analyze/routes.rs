use crate::api::models::AppState;
use crate::api::analyze::handlers::analyze_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_handler))
}
