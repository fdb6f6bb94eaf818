use super::{strip_code_fences, OutputError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

/// Classification of a single customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewAnalysis {
    pub sentiment: Sentiment,
    pub spam: bool,
    pub score: f64,
    pub problems: Vec<String>,
    #[serde(rename = "goodPoints")]
    pub good_points: Vec<String>,
}

pub fn build_prompt(review_text: &str) -> String {
    format!(
        r#"Analyze the following customer review and respond with ONLY a JSON object.
---
{}
---
The JSON object must contain exactly these keys:
- "sentiment": one of "positive", "neutral" or "negative"
- "spam": true or false
- "score": a number between 0 and 1
- "problems": an array of short strings describing issues (may be empty)
- "goodPoints": an array of short strings describing positives (may be empty)

Output ONLY the JSON object. Do not add explanations or Markdown fences such as ```json."#,
        review_text
    )
}

/// Parse and validate the model's answer for a review.
pub fn parse(raw: &str) -> Result<ReviewAnalysis, OutputError> {
    let value: Value =
        serde_json::from_str(strip_code_fences(raw)).map_err(OutputError::InvalidJson)?;

    let analysis: ReviewAnalysis =
        serde_json::from_value(value).map_err(|e| OutputError::Schema(e.to_string()))?;

    if !(0.0..=1.0).contains(&analysis.score) {
        return Err(OutputError::Schema(format!(
            "score {} is outside [0, 1]",
            analysis.score
        )));
    }

    Ok(analysis)
}
