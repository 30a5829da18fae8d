//! Shared review types exchanged between the store, the AI client, and the UI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest star rating a review may carry.
pub const MIN_RATING: u8 = 1;
/// Highest star rating a review may carry.
pub const MAX_RATING: u8 = 5;

/// Returns true if `rating` is a valid star value.
pub fn is_valid_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Coarse tone of a review or draft comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sentiment: {0:?}")]
pub struct ParseSentimentError(pub String);

impl FromStr for Sentiment {
    type Err = ParseSentimentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            _ => Err(ParseSentimentError(s.to_string())),
        }
    }
}

/// One customer submission.
///
/// `merchant_reply` is the only field that changes after creation, and it is
/// set at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub author: String,
    pub rating: u8,
    /// Human-readable date, e.g. "March 12, 2024".
    pub date: String,
    pub title: String,
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Helpful votes.
    pub likes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_reply: Option<String>,
}

impl Review {
    /// Case-insensitive substring match against the title or the comment.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.comment.to_lowercase().contains(needle_lower)
            || self.title.to_lowercase().contains(needle_lower)
    }

    pub fn has_reply(&self) -> bool {
        self.merchant_reply.is_some()
    }
}

/// A validated draft from the authoring form, waiting for an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub author: String,
    pub rating: u8,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub sentiment: Sentiment,
}

impl NewReview {
    /// Attach an id and produce a fresh review with no votes and no reply.
    pub fn into_review(self, id: String) -> Review {
        Review {
            id,
            author: self.author,
            rating: self.rating,
            date: self.date,
            title: self.title,
            comment: self.comment,
            avatar: None,
            images: None,
            sentiment: Some(self.sentiment),
            tags: None,
            likes: 0,
            merchant_reply: None,
        }
    }
}

/// The single catalogue item the reviews belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub average_rating: f32,
    pub total_reviews: u32,
}

/// AI digest of the whole review corpus. Replaced wholesale on each refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AISummaryData {
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub top_keywords: Vec<String>,
    /// Free text such as "Very Positive" or "Mixed".
    pub overall_sentiment: String,
}
