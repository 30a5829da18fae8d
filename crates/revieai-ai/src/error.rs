use thiserror::Error;

/// Failure of a call to the generative service.
///
/// Callers treat every variant the same way ("feature unavailable for this
/// interaction"); the variants exist for logs.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response contained no candidates")]
    NoCandidates,
}
