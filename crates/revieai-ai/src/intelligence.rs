//! The seam between the application and the generative service.

use async_trait::async_trait;
use revieai_core::{AISummaryData, Review, Sentiment};

use crate::AiError;
use crate::prompts::FALLBACK_REPLY;

/// The three AI operations the review UI relies on.
///
/// Each call is a single request/response with no retry. Implementations
/// never touch application state; callers apply the results.
#[async_trait]
pub trait ReviewIntelligence: Send + Sync {
    /// Digest the whole corpus into summary, pros, cons, keywords and an
    /// overall sentiment. Malformed responses are errors.
    async fn summarize(&self, reviews: &[Review]) -> Result<AISummaryData, AiError>;

    /// Draft a short merchant reply to one review.
    async fn draft_reply(&self, review: &Review) -> Result<String, AiError>;

    /// Best-effort tone classification of a comment.
    async fn classify_sentiment(&self, comment: &str) -> Result<Sentiment, AiError>;
}

/// Map free-form model output onto a sentiment label.
///
/// Case-insensitive substring check: "positive" wins, then "negative",
/// anything else is neutral.
pub fn sentiment_from_text(text: &str) -> Sentiment {
    let lower = text.trim().to_lowercase();
    if lower.contains("positive") {
        Sentiment::Positive
    } else if lower.contains("negative") {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// Use the model's reply text, or the stock acknowledgement if it is blank.
pub fn reply_or_fallback(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        FALLBACK_REPLY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse a structured summary response.
///
/// Tolerates surrounding whitespace and a Markdown code fence. Missing
/// fields and wrong types are errors; empty values are kept as given. Pros
/// and cons beyond `max_themes` are dropped.
pub fn parse_summary(text: &str, max_themes: usize) -> Result<AISummaryData, AiError> {
    let body = strip_code_fence(text.trim());
    let mut data: AISummaryData = serde_json::from_str(body)?;
    data.pros.truncate(max_themes);
    data.cons.truncate(max_themes);
    Ok(data)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(nl) => &rest[nl + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
