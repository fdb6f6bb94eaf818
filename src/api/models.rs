use crate::llm::CompletionClient;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

pub use crate::analysis::{InsightSummary, ReviewAnalysis};

/// Model identifiers used by the handlers
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub analysis_model: String,
    pub insight_model: String,
}

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionClient>,
    pub models: Arc<ModelSettings>,
}

/// Request to analyze one review
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Aggregated feedback to summarize
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InsightRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub problems: Vec<String>,
    #[serde(rename = "goodPoints", deserialize_with = "null_as_default")]
    pub good_points: Vec<String>,
}

/// Treat an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl AnalyzeRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), AppError> {
        if self.text.trim().is_empty() {
            return Err(AppError::MissingInput);
        }
        Ok(())
    }
}

impl InsightRequest {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty() && self.good_points.is_empty()
    }
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No text provided")]
    MissingInput,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("{message}")]
    UpstreamFormat { message: String, raw: String },

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingInput | AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamFormat { .. } | AppError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = match self {
            AppError::UpstreamFormat { message, raw } => ErrorResponse {
                error: message,
                raw: Some(raw),
            },
            other => ErrorResponse {
                error: other.to_string(),
                raw: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
