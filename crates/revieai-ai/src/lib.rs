//! AI layer: review summaries, merchant reply drafts, and sentiment tagging
//! through a hosted generative model.

mod error;
pub use error::AiError;

pub mod gemini;
pub mod intelligence;
pub mod prompts;

pub use gemini::{GeminiClient, GeminiConfig};
pub use intelligence::ReviewIntelligence;
