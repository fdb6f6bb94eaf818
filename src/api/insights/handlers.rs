use crate::analysis::{self, insight};
use crate::api::models::*;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

pub async fn insights_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsightRequest>, JsonRejection>,
) -> Result<Json<InsightSummary>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    // Nothing to summarize, skip the model call
    if request.is_empty() {
        info!("No feedback to summarize");
        return Ok(Json(InsightSummary::empty()));
    }

    let model = &state.models.insight_model;
    info!(
        problems = request.problems.len(),
        good_points = request.good_points.len(),
        model = %model,
        "Summarizing feedback"
    );

    let prompt = insight::build_prompt(&request.problems, &request.good_points);
    let raw = state
        .llm
        .complete(&prompt, model, analysis::TEMPERATURE)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let summary = insight::parse(&raw).map_err(|e| AppError::Upstream(e.to_string()))?;

    info!(summary_len = summary.summary.len(), "Feedback summarized");

    Ok(Json(summary))
}
