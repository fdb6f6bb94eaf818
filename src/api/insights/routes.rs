use crate::api::models::AppState;
use crate::api::insights::handlers::insights_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/insights", post(insights_handler))
}
