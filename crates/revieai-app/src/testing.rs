//! Scripted stand-in for the generative service.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use revieai_ai::{AiError, ReviewIntelligence};
use revieai_core::{AISummaryData, Review, Sentiment};

/// One scripted summarize response.
pub struct ScriptedSummary {
    pub latency: Duration,
    pub outcome: Result<AISummaryData, ()>,
}

pub struct MockIntelligence {
    summaries: Mutex<VecDeque<ScriptedSummary>>,
    summarize_calls: AtomicUsize,
    summarized_counts: Mutex<Vec<usize>>,
    classify_calls: Mutex<Vec<String>>,
    classify_result: Mutex<Result<Sentiment, ()>>,
    classify_latency: Mutex<Duration>,
    reply_calls: AtomicUsize,
    reply_result: Mutex<Result<String, ()>>,
}

impl Default for MockIntelligence {
    fn default() -> Self {
        Self {
            summaries: Mutex::new(VecDeque::new()),
            summarize_calls: AtomicUsize::new(0),
            summarized_counts: Mutex::new(Vec::new()),
            classify_calls: Mutex::new(Vec::new()),
            classify_result: Mutex::new(Ok(Sentiment::Positive)),
            classify_latency: Mutex::new(Duration::ZERO),
            reply_calls: AtomicUsize::new(0),
            reply_result: Mutex::new(Ok("Thanks for the feedback!".into())),
        }
    }
}

pub fn summary(text: &str) -> AISummaryData {
    AISummaryData {
        summary: text.into(),
        pros: vec!["sound".into()],
        cons: vec!["weight".into()],
        top_keywords: vec!["anc".into()],
        overall_sentiment: "Mostly Positive".into(),
    }
}

impl MockIntelligence {
    /// Queue the next summarize response. Unscripted calls succeed instantly.
    pub fn push_summary(&self, latency: Duration, outcome: Result<AISummaryData, ()>) {
        self.summaries
            .lock()
            .unwrap()
            .push_back(ScriptedSummary { latency, outcome });
    }

    pub fn summarize_calls(&self) -> usize {
        self.summarize_calls.load(Ordering::SeqCst)
    }

    /// Review counts seen by each summarize call, in call order.
    pub fn summarized_counts(&self) -> Vec<usize> {
        self.summarized_counts.lock().unwrap().clone()
    }

    pub fn classify_calls(&self) -> Vec<String> {
        self.classify_calls.lock().unwrap().clone()
    }

    pub fn set_classify_result(&self, result: Result<Sentiment, ()>) {
        *self.classify_result.lock().unwrap() = result;
    }

    pub fn set_classify_latency(&self, latency: Duration) {
        *self.classify_latency.lock().unwrap() = latency;
    }

    pub fn reply_calls(&self) -> usize {
        self.reply_calls.load(Ordering::SeqCst)
    }

    pub fn set_reply_result(&self, result: Result<String, ()>) {
        *self.reply_result.lock().unwrap() = result;
    }
}

fn scripted_failure() -> AiError {
    AiError::Server {
        status: 503,
        body: "scripted failure".into(),
    }
}

#[async_trait]
impl ReviewIntelligence for MockIntelligence {
    async fn summarize(&self, reviews: &[Review]) -> Result<AISummaryData, AiError> {
        let n = self.summarize_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.summarized_counts.lock().unwrap().push(reviews.len());
        let scripted = self.summaries.lock().unwrap().pop_front();
        let Some(scripted) = scripted else {
            return Ok(summary(&format!("summary #{n}")));
        };
        tokio::time::sleep(scripted.latency).await;
        scripted.outcome.map_err(|()| scripted_failure())
    }

    async fn draft_reply(&self, _review: &Review) -> Result<String, AiError> {
        self.reply_calls.fetch_add(1, Ordering::SeqCst);
        let result = self.reply_result.lock().unwrap().clone();
        result.map_err(|()| scripted_failure())
    }

    async fn classify_sentiment(&self, comment: &str) -> Result<Sentiment, AiError> {
        self.classify_calls.lock().unwrap().push(comment.to_string());
        let result = *self.classify_result.lock().unwrap();
        let latency = *self.classify_latency.lock().unwrap();
        tokio::time::sleep(latency).await;
        result.map_err(|()| scripted_failure())
    }
}
