//! Sort keys and the filter-sort pipeline behind the review list.
//!
//! The display list is always derived: [`filter_and_sort`] clones the
//! matching reviews into a new vector and never touches its input.
//!
//! # Ordering rules
//!
//! - `newest`: store order is kept. New reviews are prepended, so the store
//!   is already most-recent-first. There is no timestamp comparison.
//! - `highest` / `lowest`: by rating, descending / ascending.
//! - `most_helpful`: by helpful votes, descending.
//!
//! Every sort is stable, so reviews that compare equal keep their relative
//! store order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

use crate::review::Review;

/// Ordering applied to the display list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Newest,
    Highest,
    Lowest,
    MostHelpful,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Newest,
        SortKey::Highest,
        SortKey::Lowest,
        SortKey::MostHelpful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
            Self::MostHelpful => "most_helpful",
        }
    }

    /// Label shown in the sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Highest => "Highest Rating",
            Self::Lowest => "Lowest Rating",
            Self::MostHelpful => "Most Helpful",
        }
    }

    /// Reorder `reviews` in place according to this key.
    pub fn apply(&self, reviews: &mut [Review]) {
        match self {
            // Store order is already newest-first.
            Self::Newest => {}
            Self::Highest => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
            Self::Lowest => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
            Self::MostHelpful => reviews.sort_by(|a, b| b.likes.cmp(&a.likes)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key {0:?} (expected newest, highest, lowest or most_helpful)")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ParseSortKeyError(s.to_string()))
    }
}

/// Derive the display list from the full review sequence.
///
/// 1. Keep reviews whose title or comment contains `query`, ignoring case.
///    An empty query keeps everything.
/// 2. Reorder the survivors with `sort` (stable).
pub fn filter_and_sort(reviews: &[Review], query: &str, sort: SortKey) -> Vec<Review> {
    let mut result: Vec<Review> = if query.is_empty() {
        reviews.to_vec()
    } else {
        let needle = query.to_lowercase();
        reviews
            .iter()
            .filter(|r| r.matches_lowercase(&needle))
            .cloned()
            .collect()
    };

    sort.apply(&mut result);
    trace!(
        total = reviews.len(),
        shown = result.len(),
        sort = %sort,
        "display list recomputed"
    );
    result
}
