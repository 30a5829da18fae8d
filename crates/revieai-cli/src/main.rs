mod display;

use std::sync::Arc;

use anyhow::{Context, bail};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use revieai_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use revieai_ai::{AiError, GeminiClient, GeminiConfig, ReviewIntelligence};
use revieai_app::{App, ReplyOutcome};
use revieai_core::{AISummaryData, Review, Sentiment, SortKey};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "revieai", version, about = "AI-assisted product reviews")]
struct Cli {
    /// Key for the generative language API.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Model used for summaries, replies and sentiment.
    #[arg(long, env = "REVIEAI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    #[arg(long, env = "REVIEAI_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the product page: header, rating stats, AI summary and reviews.
    Show {
        /// Only show reviews whose title or comment contains this text.
        #[arg(long, default_value = "")]
        query: String,
        /// newest, highest, lowest or most_helpful.
        #[arg(long, default_value = "newest")]
        sort: SortKey,
        /// Show merchant reply actions.
        #[arg(long)]
        merchant: bool,
        /// Skip the AI summary request.
        #[arg(long)]
        no_summary: bool,
    },
    /// Print the AI summary of all reviews.
    Summarize,
    /// Classify the sentiment of a piece of text.
    Classify { text: String },
    /// Draft and attach an AI merchant reply to a review.
    Reply { id: String },
    /// Write a review through the authoring form and submit it.
    Post {
        #[arg(long, default_value_t = revieai_app::draft::DEFAULT_RATING)]
        rating: u8,
        #[arg(long)]
        title: String,
        #[arg(long)]
        comment: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let cli = Cli::parse();
    info!("revieai v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Show {
            ref query,
            sort,
            merchant,
            no_summary,
        } => {
            let app = App::seeded(client_or_offline(&cli));
            app.set_query(query.as_str());
            app.set_sort(sort);
            if merchant {
                app.toggle_merchant_mode();
            }
            if !no_summary {
                app.mount();
                app.summary_settled().await;
            }
            print_page(&app, !no_summary);
        }
        Command::Summarize => {
            let app = App::seeded(connect(&cli)?);
            app.mount();
            app.summary_settled().await;
            match app.summary() {
                (Some(data), _) => print!("{}", display::render_summary(Some(&data), false)),
                (None, _) => bail!("summary request failed"),
            }
        }
        Command::Classify { ref text } => {
            let client = connect(&cli)?;
            let sentiment = client
                .classify_sentiment(text)
                .await
                .context("sentiment request failed")?;
            println!("{sentiment}");
        }
        Command::Reply { ref id } => {
            let app = App::seeded(connect(&cli)?);
            app.toggle_merchant_mode();
            match app.request_merchant_reply(id).await {
                ReplyOutcome::Attached(_) => print_review(&app, id),
                ReplyOutcome::AlreadyReplied => {
                    println!("Review {id} already has a reply.");
                    print_review(&app, id);
                }
                ReplyOutcome::UnknownReview => bail!("no review with id {id}"),
                ReplyOutcome::NotMerchantMode => bail!("merchant mode is off"),
                ReplyOutcome::Failed => bail!("reply generation failed"),
            }
        }
        Command::Post {
            rating,
            ref title,
            ref comment,
        } => {
            let app = App::seeded(client_or_offline(&cli));
            app.mount();
            app.summary_settled().await;

            let mut draft = app.open_form();
            draft.set_rating(rating)?;
            draft.set_title(title.as_str());
            draft.set_comment(comment.as_str());
            draft.settled().await;
            match draft.sentiment() {
                Some(sentiment) => println!("Detected sentiment: {sentiment}"),
                None => println!("Sentiment not detected; saving as {}", Sentiment::Neutral),
            }

            let review = app.submit_review(&mut draft)?;
            println!("Posted review {}.\n", review.id);
            app.summary_settled().await;
            print_page(&app, true);
        }
    }
    Ok(())
}

/// Build the live client, failing if it cannot be configured.
fn connect(cli: &Cli) -> anyhow::Result<Arc<dyn ReviewIntelligence>> {
    let config = GeminiConfig {
        api_key: cli.api_key.clone().unwrap_or_default(),
        model: cli.model.clone(),
        base_url: cli.base_url.clone(),
        ..GeminiConfig::new("")
    };
    let client = GeminiClient::new(config).context("set GEMINI_API_KEY or pass --api-key")?;
    Ok(Arc::new(client))
}

/// Like [`connect`], but pages still render without a key; AI panels stay empty.
fn client_or_offline(cli: &Cli) -> Arc<dyn ReviewIntelligence> {
    connect(cli).unwrap_or_else(|e| {
        warn!(error = %e, "AI features disabled");
        Arc::new(Offline)
    })
}

fn print_page(app: &App, with_summary: bool) {
    let (product, stats, merchant) =
        app.read(|s| (s.product().clone(), s.stats(), s.merchant_mode()));
    println!("{}", display::render_product(&product));
    println!("{}", display::render_stats(&stats));
    if with_summary {
        let (summary, loading) = app.summary();
        println!("{}", display::render_summary(summary.as_ref(), loading));
    }
    print!("{}", display::render_reviews(&app.display_list(), merchant));
}

fn print_review(app: &App, id: &str) {
    let review = app.read(|s| s.store().get(id).cloned());
    if let Some(review) = review {
        print!("{}", display::render_review(&review, true));
    }
}

/// Stand-in client used when no API key is configured.
struct Offline;

#[async_trait]
impl ReviewIntelligence for Offline {
    async fn summarize(&self, _reviews: &[Review]) -> Result<AISummaryData, AiError> {
        Err(AiError::MissingApiKey)
    }

    async fn draft_reply(&self, _review: &Review) -> Result<String, AiError> {
        Err(AiError::MissingApiKey)
    }

    async fn classify_sentiment(&self, _comment: &str) -> Result<Sentiment, AiError> {
        Err(AiError::MissingApiKey)
    }
}
