use crate::analysis::{self, review};
use crate::api::models::*;
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{info, warn};

pub async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ReviewAnalysis>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;

    // Validate
    request.validate()?;

    let model = &state.models.analysis_model;
    info!(text_len = request.text.len(), model = %model, "Analyzing review");

    // Ask the model
    let prompt = review::build_prompt(&request.text);
    let raw = state
        .llm
        .complete(&prompt, model, analysis::TEMPERATURE)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    // Parse & validate
    let result = review::parse(&raw).map_err(|e| {
        warn!(error = %e, "Unusable model output");
        AppError::UpstreamFormat {
            message: e.to_string(),
            raw: raw.clone(),
        }
    })?;

    info!(
        sentiment = ?result.sentiment,
        spam = result.spam,
        score = result.score,
        "Review analyzed"
    );

    Ok(Json(result))
}
