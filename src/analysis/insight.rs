use super::{strip_code_fences, OutputError};
use serde::{Deserialize, Serialize};

/// Returned without calling the model when there is nothing to summarize
pub const NO_REVIEWS_SUMMARY: &str = "No reviews available yet.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub summary: String,
}

impl InsightSummary {
    pub fn empty() -> Self {
        Self {
            summary: NO_REVIEWS_SUMMARY.to_string(),
        }
    }
}

pub fn build_prompt(problems: &[String], good_points: &[String]) -> String {
    // Lists are rendered as JSON arrays so quotes inside items survive.
    let problems = serde_json::to_string(problems).unwrap_or_default();
    let good_points = serde_json::to_string(good_points).unwrap_or_default();

    format!(
        r#"Summarize the following customer feedback into clear insights.
Problems reported: {}
Good points mentioned: {}

Return STRICT JSON with exactly one key:
"summary": a short text summarizing the top complaints and the top praises."#,
        problems, good_points
    )
}

pub fn parse(raw: &str) -> Result<InsightSummary, OutputError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| {
        if e.is_data() {
            OutputError::Schema(e.to_string())
        } else {
            OutputError::InvalidJson(e)
        }
    })
}
