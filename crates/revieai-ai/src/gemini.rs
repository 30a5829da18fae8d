//! HTTP client for the Generative Language `generateContent` endpoint.

use std::fmt;

use async_trait::async_trait;
use revieai_core::{AISummaryData, Review, Sentiment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::intelligence::{ReviewIntelligence, parse_summary, reply_or_fallback, sentiment_from_text};
use crate::prompts::{self, DEFAULT_MAX_THEMES};
use crate::AiError;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Connection settings, read once at startup.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Like `https://generativelanguage.googleapis.com` (no trailing slash).
    pub base_url: String,
    /// Pros and cons kept per summary.
    pub max_themes: usize,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_themes: DEFAULT_MAX_THEMES,
        }
    }
}

// Keep the key out of logs.
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_themes", &self.max_themes)
            .finish()
    }
}

// ── Wire types ──

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateRequest {
    fn user(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: None,
            generation_config: None,
        }
    }

    fn with_system(mut self, instruction: &str) -> Self {
        self.system_instruction = Some(Content {
            role: None,
            parts: vec![Part {
                text: instruction.to_string(),
            }],
        });
        self
    }

    fn with_output(mut self, mime: &'static str, schema: Option<Value>) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: mime,
            response_schema: schema,
        });
        self
    }
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Result<String, AiError> {
        let candidate = self.candidates.first().ok_or(AiError::NoCandidates)?;
        Ok(candidate
            .content
            .as_ref()
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect::<String>())
            .unwrap_or_default())
    }
}

/// [`ReviewIntelligence`] backed by a hosted Gemini model.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client. Fails if no API key is configured.
    pub fn new(mut config: GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::MissingApiKey);
        }
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn generate(&self, request: &GenerateRequest) -> Result<String, AiError> {
        let url = self.endpoint();
        debug!(url = %url, model = %self.config.model, "calling generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.text()
    }
}

/// Treat a response without candidates as empty text. Other failures pass through.
fn or_empty(result: Result<String, AiError>) -> Result<String, AiError> {
    match result {
        Err(AiError::NoCandidates) => Ok(String::new()),
        other => other,
    }
}

#[async_trait]
impl ReviewIntelligence for GeminiClient {
    async fn summarize(&self, reviews: &[Review]) -> Result<AISummaryData, AiError> {
        let request = GenerateRequest::user(prompts::summarize_prompt(reviews)).with_output(
            "application/json",
            Some(prompts::summary_schema(self.config.max_themes)),
        );

        info!(count = reviews.len(), "requesting review summary");
        let text = self.generate(&request).await?;
        let data = parse_summary(&text, self.config.max_themes)?;
        info!(
            pros = data.pros.len(),
            cons = data.cons.len(),
            sentiment = %data.overall_sentiment,
            "review summary received"
        );
        Ok(data)
    }

    async fn draft_reply(&self, review: &Review) -> Result<String, AiError> {
        let request = GenerateRequest::user(prompts::reply_prompt(review))
            .with_system(prompts::REPLY_SYSTEM_PROMPT);

        info!(id = %review.id, rating = review.rating, "drafting merchant reply");
        let text = or_empty(self.generate(&request).await)?;
        Ok(reply_or_fallback(&text))
    }

    async fn classify_sentiment(&self, comment: &str) -> Result<Sentiment, AiError> {
        let request = GenerateRequest::user(prompts::sentiment_prompt(comment))
            .with_output("text/plain", None);

        let text = or_empty(self.generate(&request).await)?;
        let sentiment = sentiment_from_text(&text);
        debug!(raw = %text.trim(), %sentiment, "sentiment classified");
        Ok(sentiment)
    }
}
