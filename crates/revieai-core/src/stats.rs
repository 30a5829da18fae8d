//! Aggregate rating statistics for the review header.

use crate::review::{MAX_RATING, MIN_RATING, Review};

/// Star distribution and average over a set of reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    /// `(star, count)` from 5 stars down to 1.
    pub distribution: Vec<(u8, usize)>,
    /// Mean rating rounded to one decimal; `0.0` when there are no reviews.
    pub average: f32,
    pub total: usize,
}

impl RatingStats {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let distribution = (MIN_RATING..=MAX_RATING)
            .rev()
            .map(|star| (star, reviews.iter().filter(|r| r.rating == star).count()))
            .collect();

        let total = reviews.len();
        let average = if total == 0 {
            0.0
        } else {
            let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            let mean = sum as f32 / total as f32;
            (mean * 10.0).round() / 10.0
        };

        Self {
            distribution,
            average,
            total,
        }
    }

    /// Number of reviews with exactly `star` stars.
    pub fn count(&self, star: u8) -> usize {
        self.distribution
            .iter()
            .find(|(s, _)| *s == star)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Largest single bucket, used to scale bars.
    pub fn max_count(&self) -> usize {
        self.distribution.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }
}
