//! Plain-text rendering of the review page for the terminal.

use revieai_core::{AISummaryData, Product, RatingStats, Review};

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 18;

// ── Public API ──

/// Product header: name, brand, price and the catalogue blurb.
pub fn render_product(product: &Product) -> String {
    let mut lines = vec![
        format!("=== {} ===", product.name),
        format!("{} · {}", product.brand, product.category),
        format!("${:.2}", product.price),
    ];
    if !product.description.is_empty() {
        lines.push(product.description.clone());
    }
    join_lines(lines)
}

/// Average rating plus one bar per star bucket, scaled to the largest bucket.
pub fn render_stats(stats: &RatingStats) -> String {
    let mut lines = vec![format!(
        "{:.1} {}  ({} reviews)",
        stats.average,
        stars(stats.average.round() as u8),
        stats.total
    )];
    let max = stats.max_count();
    for &(star, count) in &stats.distribution {
        let filled = if max == 0 { 0 } else { count * BAR_WIDTH / max };
        lines.push(format!(
            "  {star}★ {}{} {count}",
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled),
        ));
    }
    join_lines(lines)
}

/// The AI summary panel. Loading wins over stale data so the user knows a
/// refresh is underway.
pub fn render_summary(summary: Option<&AISummaryData>, loading: bool) -> String {
    let mut lines = vec!["AI Summary".to_string()];
    match summary {
        _ if loading => lines.push("  Analyzing reviews...".into()),
        None => lines.push("  No summary available.".into()),
        Some(data) => {
            lines.push(format!("  {}", data.summary));
            lines.push(labelled("Overall", &data.overall_sentiment));
            lines.extend(list_line("Pros", &data.pros));
            lines.extend(list_line("Cons", &data.cons));
            lines.extend(list_line("Keywords", &data.top_keywords));
        }
    }
    join_lines(lines)
}

/// One review card. In merchant mode, unreplied reviews advertise the reply
/// action with their id.
pub fn render_review(review: &Review, merchant_mode: bool) -> String {
    let mut byline = format!("  {} · {}", review.author, review.date);
    if let Some(sentiment) = review.sentiment {
        byline.push_str(" · ");
        byline.push_str(sentiment.as_str());
    }

    let mut lines = vec![
        format!("[{}] {} {}", review.id, stars(review.rating), review.title),
        byline,
        format!("  {}", review.comment),
    ];
    if let Some(tags) = review.tags.as_ref().filter(|t| !t.is_empty()) {
        lines.push(format!("  #{}", tags.join(" #")));
    }
    lines.push(format!("  {} found this helpful", review.likes));

    match &review.merchant_reply {
        Some(reply) => lines.push(format!("  ↳ Merchant: {reply}")),
        None if merchant_mode => lines.push(format!(
            "  ↳ revieai reply {} to draft an AI reply",
            review.id
        )),
        None => {}
    }
    join_lines(lines)
}

/// Every card in display order, separated by blank lines.
pub fn render_reviews(reviews: &[Review], merchant_mode: bool) -> String {
    if reviews.is_empty() {
        return "No reviews match your search.\n".to_string();
    }
    reviews
        .iter()
        .map(|r| render_review(r, merchant_mode))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Helpers ──

/// One line per entry, each newline-terminated.
fn join_lines(lines: Vec<String>) -> String {
    lines.into_iter().map(|l| l + "\n").collect()
}

fn labelled(label: &str, value: &str) -> String {
    format!("  {label:<LABEL_WIDTH$} {value}")
}

fn list_line(label: &str, items: &[String]) -> Option<String> {
    (!items.is_empty()).then(|| labelled(label, &items.join(", ")))
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
