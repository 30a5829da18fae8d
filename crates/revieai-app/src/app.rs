//! The running application: shared state plus the controllers that call out
//! to the AI service.
//!
//! State lives in a [`watch`] channel. Each event applies one closure to it,
//! so observers never see a half-applied update, and presentation code can
//! subscribe to redraw on change.

use std::sync::Arc;

use revieai_ai::ReviewIntelligence;
use revieai_core::{AISummaryData, Review, SortKey};
use revieai_store::StoreError;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::draft::{DraftError, ReviewDraft};
use crate::state::AppState;
use crate::summary::Settled;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of asking for a merchant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The drafted reply was attached to the review.
    Attached(String),
    NotMerchantMode,
    UnknownReview,
    AlreadyReplied,
    /// The AI call failed; the review is unchanged.
    Failed,
}

#[derive(Clone)]
pub struct App {
    state: Arc<watch::Sender<AppState>>,
    client: Arc<dyn ReviewIntelligence>,
}

impl App {
    pub fn new(state: AppState, client: Arc<dyn ReviewIntelligence>) -> Self {
        let (tx, _) = watch::channel(state);
        Self {
            state: Arc::new(tx),
            client,
        }
    }

    pub fn seeded(client: Arc<dyn ReviewIntelligence>) -> Self {
        Self::new(AppState::seeded(), client)
    }

    /// Receive a notification after every state change.
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Read the state. Do not call back into `App` from `f`.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn display_list(&self) -> Vec<Review> {
        self.read(|s| s.display_list().to_vec())
    }

    /// Current summary and whether a refresh is running.
    pub fn summary(&self) -> (Option<AISummaryData>, bool) {
        self.read(|s| (s.summary().cloned(), s.summary_loading()))
    }

    // ── Presentation inputs ──

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_modify(|s| s.set_query(query));
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.state.send_modify(|s| s.set_sort(sort));
    }

    /// Flip merchant mode and return the new value.
    pub fn toggle_merchant_mode(&self) -> bool {
        let mut on = false;
        self.state.send_modify(|s| on = s.toggle_merchant_mode());
        info!(merchant_mode = on, "merchant mode toggled");
        on
    }

    // ── Summary refresh ──

    /// Start up: fetch the first summary.
    pub fn mount(&self) -> Option<JoinHandle<()>> {
        self.refresh_summary()
    }

    /// Start a summary refresh if the review count changed since the last one.
    ///
    /// Returns the handle of the spawned request, or `None` if no refresh was
    /// due. In-flight refreshes are never cancelled.
    pub fn refresh_summary(&self) -> Option<JoinHandle<()>> {
        let mut started = None;
        self.state.send_if_modified(|s| {
            let count = s.review_count();
            if !s.summary_slot().needs_refresh(count) {
                return false;
            }
            let generation = s.summary_mut().begin(count);
            started = Some((generation, s.reviews().to_vec()));
            true
        });
        let (generation, reviews) = started?;

        info!(generation, count = reviews.len(), "summary refresh started");
        let app = self.clone();
        Some(tokio::spawn(async move {
            let result = app.client.summarize(&reviews).await;
            if let Err(e) = &result {
                warn!(generation, error = %e, "summary refresh failed; keeping previous summary");
            }
            let mut outcome = Settled::Failed;
            app.state
                .send_modify(|s| outcome = s.summary_mut().settle(generation, result));
            match outcome {
                Settled::Applied => info!(generation, "summary updated"),
                Settled::Stale => debug!(generation, "newer summary already shown; response dropped"),
                Settled::Failed => {}
            }
        }))
    }

    /// Wait until no summary refresh is in flight.
    pub async fn summary_settled(&self) {
        let mut rx = self.state.subscribe();
        // The sender is owned by `self`, so the channel stays open.
        let _ = rx.wait_for(|s| !s.summary_loading()).await;
    }

    // ── Authoring ──

    pub fn open_form(&self) -> ReviewDraft {
        self.state.send_modify(AppState::open_form);
        ReviewDraft::new(Arc::clone(&self.client))
    }

    /// Discard a draft without submitting it.
    pub fn close_form(&self, draft: ReviewDraft) {
        drop(draft);
        self.state.send_modify(AppState::close_form);
    }

    /// Validate the draft and prepend it to the store.
    ///
    /// An invalid draft leaves the store and the form untouched. On success
    /// the form is closed and a summary refresh is started.
    pub fn submit_review(&self, draft: &mut ReviewDraft) -> Result<Review, SubmitError> {
        let new_review = draft.to_new_review().inspect_err(|e| {
            debug!(error = %e, "review draft rejected");
        })?;

        let review = new_review.into_review(self.read(AppState::fresh_id));

        let mut prepended = Ok(());
        self.state.send_if_modified(|s| {
            prepended = s.prepend_review(review.clone());
            if prepended.is_ok() {
                s.close_form();
            }
            prepended.is_ok()
        });
        prepended?;
        draft.cancel_pending();
        info!(id = %review.id, rating = review.rating, "review submitted");

        self.refresh_summary();
        Ok(review)
    }

    // ── Merchant replies ──

    /// Draft and attach a merchant reply to one review.
    ///
    /// Only runs in merchant mode and only for reviews without a reply.
    /// Failures are logged and leave the review unchanged.
    pub async fn request_merchant_reply(&self, id: &str) -> ReplyOutcome {
        let target = self.read(|s| {
            if !s.merchant_mode() {
                return Err(ReplyOutcome::NotMerchantMode);
            }
            match s.store().get(id) {
                None => Err(ReplyOutcome::UnknownReview),
                Some(r) if r.has_reply() => Err(ReplyOutcome::AlreadyReplied),
                Some(r) => Ok(r.clone()),
            }
        });
        let review = match target {
            Ok(review) => review,
            Err(outcome) => {
                debug!(id, ?outcome, "merchant reply not requested");
                return outcome;
            }
        };

        let reply = match self.client.draft_reply(&review).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(id, error = %e, "merchant reply generation failed");
                return ReplyOutcome::Failed;
            }
        };

        let mut patched = Ok(());
        self.state.send_if_modified(|s| {
            patched = s.patch_reply(id, reply.clone());
            patched.is_ok()
        });
        match patched {
            Ok(()) => {
                info!(id, "merchant reply attached");
                ReplyOutcome::Attached(reply)
            }
            Err(StoreError::ReplyAlreadySet(_)) => ReplyOutcome::AlreadyReplied,
            Err(e) => {
                warn!(id, error = %e, "could not attach merchant reply");
                ReplyOutcome::UnknownReview
            }
        }
    }
}
