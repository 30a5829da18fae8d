//! In-memory review store: the single source of truth for the review list.

use revieai_core::review::is_valid_rating;
use revieai_core::{Review, seed};
use tracing::{debug, info};

use crate::StoreError;

/// Ordered, in-memory sequence of reviews, most recent first.
///
/// The store only supports two mutations: [`prepend`](Self::prepend) for new
/// reviews and [`attach_reply`](Self::attach_reply) for merchant replies.
/// Every successful mutation bumps [`revision`](Self::revision), which
/// callers use to key cached views.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    reviews: Vec<Review>,
    revision: u64,
}

impl ReviewStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing sequence, validating every record.
    pub fn with_reviews(reviews: Vec<Review>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for review in reviews {
            store.check_insertable(&review)?;
            store.reviews.push(review);
        }
        info!(count = store.reviews.len(), "review store loaded");
        Ok(store)
    }

    /// A store holding the built-in seed reviews.
    pub fn seeded() -> Self {
        Self {
            reviews: seed::initial_reviews(),
            revision: 0,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Mutation counter, bumped on every successful write.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Generate an id not used by any stored review.
    ///
    /// Based on the current Unix time in milliseconds, bumped until unique.
    pub fn fresh_id(&self) -> String {
        let mut candidate = chrono::Utc::now().timestamp_millis();
        while self.contains(&candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Insert a review at the front, making it the most recent.
    pub fn prepend(&mut self, review: Review) -> Result<(), StoreError> {
        self.check_insertable(&review)?;
        debug!(id = %review.id, rating = review.rating, "prepending review");
        self.reviews.insert(0, review);
        self.revision += 1;
        Ok(())
    }

    /// Set the merchant reply of one review, leaving everything else as is.
    ///
    /// A reply, once set, is never replaced.
    pub fn attach_reply(&mut self, id: &str, reply: String) -> Result<&Review, StoreError> {
        let idx = self
            .reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if self.reviews[idx].merchant_reply.is_some() {
            return Err(StoreError::ReplyAlreadySet(id.to_string()));
        }

        self.reviews[idx].merchant_reply = Some(reply);
        self.revision += 1;
        debug!(id, "merchant reply attached");
        Ok(&self.reviews[idx])
    }

    fn check_insertable(&self, review: &Review) -> Result<(), StoreError> {
        if !is_valid_rating(review.rating) {
            return Err(StoreError::InvalidRating(review.rating));
        }
        if self.contains(&review.id) {
            return Err(StoreError::DuplicateId(review.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revieai_core::{NewReview, Sentiment};

    fn authored(id: &str, rating: u8) -> Review {
        NewReview {
            author: "You".into(),
            rating,
            date: "April 2, 2024".into(),
            title: "Nice".into(),
            comment: "Really nice headphones".into(),
            sentiment: Sentiment::Neutral,
        }
        .into_review(id.into())
    }

    #[test]
    fn seeded_store_has_three_reviews() {
        let store = ReviewStore::seeded();
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), 0);
        assert!(store.contains("3"));
    }

    #[test]
    fn prepend_puts_review_first() {
        let mut store = ReviewStore::seeded();
        store.prepend(authored("100", 3)).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.reviews()[0].id, "100");
        assert_eq!(store.reviews()[1].id, "1");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn prepend_rejects_duplicate_id() {
        let mut store = ReviewStore::seeded();
        let err = store.prepend(authored("2", 3)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("2".into()));
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn prepend_rejects_out_of_range_rating() {
        let mut store = ReviewStore::new();
        assert_eq!(
            store.prepend(authored("a", 0)).unwrap_err(),
            StoreError::InvalidRating(0)
        );
        assert_eq!(
            store.prepend(authored("a", 6)).unwrap_err(),
            StoreError::InvalidRating(6)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn with_reviews_validates_records() {
        let err = ReviewStore::with_reviews(vec![authored("a", 4), authored("a", 5)]).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".into()));
        let store = ReviewStore::with_reviews(vec![authored("a", 4), authored("b", 5)]).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn attach_reply_touches_only_target() {
        let mut store = ReviewStore::seeded();
        let before = store.reviews().to_vec();

        let updated = store.attach_reply("2", "Thanks Michael!".into()).unwrap();
        assert_eq!(updated.merchant_reply.as_deref(), Some("Thanks Michael!"));

        let after = store.reviews();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        let mut expected = before[1].clone();
        expected.merchant_reply = Some("Thanks Michael!".into());
        assert_eq!(after[1], expected);
    }

    #[test]
    fn attach_reply_never_overwrites() {
        let mut store = ReviewStore::seeded();
        let err = store.attach_reply("3", "Another reply".into()).unwrap_err();
        assert_eq!(err, StoreError::ReplyAlreadySet("3".into()));
        assert!(
            store.get("3").unwrap().merchant_reply.as_deref().unwrap().starts_with("We are sorry")
        );
    }

    #[test]
    fn attach_reply_unknown_id() {
        let mut store = ReviewStore::seeded();
        assert_eq!(
            store.attach_reply("nope", "hi".into()).unwrap_err(),
            StoreError::NotFound("nope".into())
        );
    }

    #[test]
    fn fresh_id_is_unique() {
        let mut store = ReviewStore::new();
        for _ in 0..5 {
            let id = store.fresh_id();
            assert!(!store.contains(&id));
            store.prepend(authored(&id, 5)).unwrap();
        }
        assert_eq!(store.len(), 5);
    }
}
