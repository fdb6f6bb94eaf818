//! Prompt construction and model-output parsing for both endpoints.

pub mod insight;
pub mod review;

pub use insight::InsightSummary;
pub use review::ReviewAnalysis;

use thiserror::Error;

/// Decoding temperature for every model call
pub const TEMPERATURE: f32 = 0.0;

/// Failure to turn model text into the expected JSON object
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Invalid JSON from model")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Model output does not match the expected schema: {0}")]
    Schema(String),
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````) from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        cleaned = rest.trim_start();
    }

    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim_end();
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn strips_bare_fence_and_outer_whitespace() {
        let text = "  \n```\n{\"a\": 1}\n```\n ";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn uppercase_tag_is_stripped() {
        assert_eq!(strip_code_fences("```JSON {\"a\": 1} ```"), "{\"a\": 1}");
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences(" {\"a\": 1}\n"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("not json"), "not json");
    }
}
