//! Application layer: shared state, summary refresh, review authoring and
//! merchant replies on top of the review store and the AI client.

mod app;
pub mod debounce;
pub mod draft;
pub mod state;
pub mod summary;

#[cfg(test)]
mod testing;

pub use app::{App, ReplyOutcome, SubmitError};
pub use draft::{DraftError, ReviewDraft, SentimentProbe};
pub use state::AppState;
