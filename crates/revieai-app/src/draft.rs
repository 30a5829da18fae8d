//! Review authoring form: draft fields plus debounced sentiment tagging.
//!
//! Every comment edit restarts an 800 ms quiet timer. When it elapses and
//! the comment has at least 10 characters, the comment is sent for
//! classification. Shorter comments clear the sentiment straight away.
//!
//! Requests are never cancelled once issued, but a result is only shown if
//! the comment has not been edited since the request went out.

use std::sync::Arc;
use std::time::Duration;

use revieai_ai::ReviewIntelligence;
use revieai_core::review::is_valid_rating;
use revieai_core::{NewReview, Sentiment};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::debounce::Debouncer;

pub const SENTIMENT_DEBOUNCE: Duration = Duration::from_millis(800);
/// Comments shorter than this are never classified.
pub const MIN_CLASSIFY_CHARS: usize = 10;
pub const DEFAULT_RATING: u8 = 5;
/// Author name used for reviews written in this session.
pub const DRAFT_AUTHOR: &str = "You";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("a review headline is required")]
    MissingTitle,
    #[error("review text is required")]
    MissingComment,
    #[error("rating {0} is outside 1..=5")]
    InvalidRating(u8),
}

/// Live sentiment state of the draft comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SentimentProbe {
    pub sentiment: Option<Sentiment>,
    /// Classification requests currently in flight.
    pub analyzing: usize,
    /// A debounce timer is waiting to fire.
    pub scheduled: bool,
    /// Bumped on every comment edit.
    edit: u64,
}

impl SentimentProbe {
    pub fn is_analyzing(&self) -> bool {
        self.analyzing > 0
    }

    /// No timer pending and no request in flight.
    pub fn is_settled(&self) -> bool {
        !self.scheduled && self.analyzing == 0
    }
}

pub struct ReviewDraft {
    rating: u8,
    title: String,
    comment: String,
    probe: Arc<watch::Sender<SentimentProbe>>,
    debounce: Debouncer,
    client: Arc<dyn ReviewIntelligence>,
}

impl ReviewDraft {
    pub fn new(client: Arc<dyn ReviewIntelligence>) -> Self {
        Self::with_delay(client, SENTIMENT_DEBOUNCE)
    }

    pub fn with_delay(client: Arc<dyn ReviewIntelligence>, delay: Duration) -> Self {
        let (probe, _) = watch::channel(SentimentProbe::default());
        Self {
            rating: DEFAULT_RATING,
            title: String::new(),
            comment: String::new(),
            probe: Arc::new(probe),
            debounce: Debouncer::new(delay),
            client,
        }
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), DraftError> {
        if !is_valid_rating(rating) {
            return Err(DraftError::InvalidRating(rating));
        }
        self.rating = rating;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Update the comment and (re)start the classification timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
        self.debounce.cancel();

        let long_enough = self.comment.chars().count() >= MIN_CLASSIFY_CHARS;
        let mut edit = 0;
        self.probe.send_modify(|p| {
            p.edit += 1;
            p.scheduled = long_enough;
            if !long_enough {
                p.sentiment = None;
            }
            edit = p.edit;
        });
        if !long_enough {
            return;
        }

        let probe = Arc::clone(&self.probe);
        let client = Arc::clone(&self.client);
        let comment = self.comment.clone();
        self.debounce
            .schedule(classify(probe, client, comment, edit));
    }

    /// Latest resolved sentiment, if any.
    pub fn sentiment(&self) -> Option<Sentiment> {
        self.probe.borrow().sentiment
    }

    pub fn is_analyzing(&self) -> bool {
        self.probe.borrow().is_analyzing()
    }

    pub fn probe(&self) -> SentimentProbe {
        self.probe.borrow().clone()
    }

    /// Watch the sentiment state, e.g. to redraw an indicator.
    pub fn subscribe(&self) -> watch::Receiver<SentimentProbe> {
        self.probe.subscribe()
    }

    /// Wait until no timer is pending and no request is in flight.
    pub async fn settled(&self) {
        let mut rx = self.probe.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(SentimentProbe::is_settled).await;
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.comment.is_empty() {
            return Err(DraftError::MissingComment);
        }
        Ok(())
    }

    /// Turn the draft into a review record, dated today.
    ///
    /// Sentiment falls back to neutral if no classification has resolved.
    pub fn to_new_review(&self) -> Result<NewReview, DraftError> {
        self.validate()?;
        Ok(NewReview {
            author: DRAFT_AUTHOR.to_string(),
            rating: self.rating,
            date: display_date(chrono::Local::now().date_naive()),
            title: self.title.clone(),
            comment: self.comment.clone(),
            sentiment: self.sentiment().unwrap_or(Sentiment::Neutral),
        })
    }

    /// Stop a pending classification timer.
    pub fn cancel_pending(&mut self) {
        self.debounce.cancel();
        self.probe.send_modify(|p| p.scheduled = false);
    }
}

/// "March 12, 2024".
pub fn display_date(date: chrono::NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

async fn classify(
    probe: Arc<watch::Sender<SentimentProbe>>,
    client: Arc<dyn ReviewIntelligence>,
    comment: String,
    edit: u64,
) {
    probe.send_modify(|p| {
        if p.edit == edit {
            p.scheduled = false;
        }
        p.analyzing += 1;
    });

    let result = client.classify_sentiment(&comment).await;

    probe.send_modify(|p| {
        p.analyzing = p.analyzing.saturating_sub(1);
        match result {
            Ok(sentiment) if p.edit == edit => {
                debug!(%sentiment, "draft sentiment updated");
                p.sentiment = Some(sentiment);
            }
            Ok(sentiment) => {
                debug!(%sentiment, "comment edited since request; result dropped");
            }
            Err(e) => {
                warn!(error = %e, "sentiment classification failed");
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockIntelligence;

    fn draft(mock: &Arc<MockIntelligence>) -> ReviewDraft {
        ReviewDraft::new(mock.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn defaults() {
        let mock = Arc::new(MockIntelligence::default());
        let d = draft(&mock);
        assert_eq!(d.rating(), 5);
        assert_eq!(d.title(), "");
        assert_eq!(d.comment(), "");
        assert!(d.sentiment().is_none());
        assert!(d.probe().is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn short_comment_never_classified() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_comment("too short");
        assert!(d.probe().is_settled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(mock.classify_calls().len(), 0);
        assert!(d.sentiment().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn ten_chars_is_the_threshold() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_comment("123456789");
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(mock.classify_calls().is_empty());

        let start = tokio::time::Instant::now();
        d.set_comment("1234567890");
        tokio::time::sleep(Duration::from_millis(799)).await;
        assert!(mock.classify_calls().is_empty());

        d.settled().await;
        assert!(start.elapsed() >= SENTIMENT_DEBOUNCE);
        assert_eq!(mock.classify_calls(), vec!["1234567890"]);
        assert_eq!(d.sentiment(), Some(Sentiment::Positive));
    }

    #[tokio::test(start_paused = true)]
    async fn long_comment_classified_after_quiet_period() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_comment("These sound amazing");

        tokio::time::sleep(Duration::from_millis(700)).await;
        assert!(mock.classify_calls().is_empty());
        assert!(d.probe().scheduled);

        d.settled().await;
        assert_eq!(mock.classify_calls(), vec!["These sound amazing"]);
        assert_eq!(d.sentiment(), Some(Sentiment::Positive));
        assert!(!d.is_analyzing());
    }

    #[tokio::test(start_paused = true)]
    async fn only_latest_edit_is_classified() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_comment("These sound ok");
        tokio::time::sleep(Duration::from_millis(400)).await;
        d.set_comment("These sound okay so far");
        tokio::time::sleep(Duration::from_millis(400)).await;
        d.set_comment("These sound okay so far, but heavy");

        d.settled().await;
        assert_eq!(
            mock.classify_calls(),
            vec!["These sound okay so far, but heavy"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shrinking_below_threshold_clears_sentiment() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_comment("Wonderful headphones");
        d.settled().await;
        assert_eq!(d.sentiment(), Some(Sentiment::Positive));

        d.set_comment("Wonderful");
        assert!(d.sentiment().is_none());
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(mock.classify_calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn in_flight_request_finishes_but_stale_result_is_dropped() {
        let mock = Arc::new(MockIntelligence::default());
        mock.set_classify_latency(Duration::from_secs(3));
        let mut d = draft(&mock);

        d.set_comment("First thoughts here");
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(d.is_analyzing(), "request issued after the quiet period");

        mock.set_classify_result(Ok(Sentiment::Negative));
        d.set_comment("Second thoughts");
        // Edit moved on: the first response must not surface.
        d.settled().await;

        assert_eq!(mock.classify_calls().len(), 2);
        assert_eq!(d.sentiment(), Some(Sentiment::Negative));
    }

    #[tokio::test(start_paused = true)]
    async fn result_dropped_when_comment_shrinks_mid_request() {
        let mock = Arc::new(MockIntelligence::default());
        mock.set_classify_latency(Duration::from_secs(3));
        let mut d = draft(&mock);

        d.set_comment("Absolutely brilliant");
        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(d.is_analyzing());

        d.set_comment("Meh");
        d.settled().await;
        assert_eq!(mock.classify_calls().len(), 1);
        assert!(d.sentiment().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn classification_failure_leaves_sentiment_unset() {
        let mock = Arc::new(MockIntelligence::default());
        mock.set_classify_result(Err(()));
        let mut d = draft(&mock);
        d.set_comment("Not sure what to think");
        d.settled().await;

        assert_eq!(mock.classify_calls().len(), 1);
        assert!(d.sentiment().is_none());

        d.set_title("Unsure");
        let review = d.to_new_review().unwrap();
        assert_eq!(review.sentiment, Sentiment::Neutral);
    }

    #[tokio::test(start_paused = true)]
    async fn validation_requires_title_and_comment() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        assert_eq!(d.validate(), Err(DraftError::MissingTitle));
        d.set_title("Great");
        assert_eq!(d.validate(), Err(DraftError::MissingComment));
        d.set_comment("Yes");
        assert_eq!(d.validate(), Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn rating_must_be_in_range() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        assert_eq!(d.set_rating(0), Err(DraftError::InvalidRating(0)));
        assert_eq!(d.set_rating(6), Err(DraftError::InvalidRating(6)));
        assert_eq!(d.rating(), 5);
        d.set_rating(2).unwrap();
        assert_eq!(d.rating(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn new_review_carries_draft_fields() {
        let mock = Arc::new(MockIntelligence::default());
        let mut d = draft(&mock);
        d.set_rating(3).unwrap();
        d.set_title("Decent");
        d.set_comment("Decent for the price");
        d.settled().await;

        let review = d.to_new_review().unwrap();
        assert_eq!(review.author, DRAFT_AUTHOR);
        assert_eq!(review.rating, 3);
        assert_eq!(review.title, "Decent");
        assert_eq!(review.comment, "Decent for the price");
        assert_eq!(review.sentiment, Sentiment::Positive);
        assert!(!review.date.is_empty());
    }

    #[test]
    fn display_date_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        assert_eq!(display_date(date), "March 2, 2024");
    }
}
