//! Prompt templates and the structured-output schema for review analysis.
//!
//! Wording here is tunable. The contract with callers is the shape of the
//! parsed response, not the text of the prompt.

use revieai_core::Review;
use serde_json::{Value, json};

/// System instruction for merchant reply drafting.
pub const REPLY_SYSTEM_PROMPT: &str =
    "You are a polite, helpful customer service representative for a premium electronics brand.";

/// Reply used when the service answers with no text at all.
pub const FALLBACK_REPLY: &str = "Thank you for your feedback! We appreciate your support.";

/// Default number of pros and cons kept from a summary.
pub const DEFAULT_MAX_THEMES: usize = 3;

/// One line per review: `Rating: r/5 - title: comment`, blank-line separated.
pub fn review_digest(reviews: &[Review]) -> String {
    reviews
        .iter()
        .map(|r| format!("Rating: {}/5 - {}: {}", r.rating, r.title, r.comment))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn summarize_prompt(reviews: &[Review]) -> String {
    format!(
        "Analyze the following product reviews and provide a summary in JSON format.\n\
         \n\
         Reviews:\n\
         {digest}\n",
        digest = review_digest(reviews),
    )
}

pub fn reply_prompt(review: &Review) -> String {
    format!(
        "As a professional e-commerce merchant, write a short, empathetic response to this \
         customer review.\n\
         Review Rating: {rating} stars.\n\
         Review Text: \"{comment}\"\n\
         Keep it concise and helpful.",
        rating = review.rating,
        comment = review.comment,
    )
}

pub fn sentiment_prompt(comment: &str) -> String {
    format!(
        "Classify the sentiment of this review as exactly 'positive', 'neutral', or 'negative'.\n\
         Review: \"{comment}\""
    )
}

/// Response schema declared with the summarize request. All fields required.
pub fn summary_schema(max_themes: usize) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A 2-3 sentence overall summary of the feedback."
            },
            "pros": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Top {max_themes} positive points.")
            },
            "cons": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Top {max_themes} areas for improvement.")
            },
            "topKeywords": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Relevant keywords or themes."
            },
            "overallSentiment": {
                "type": "STRING",
                "description": "Overall sentiment description (e.g., Very Positive, Mixed)."
            }
        },
        "required": ["summary", "pros", "cons", "topKeywords", "overallSentiment"]
    })
}
