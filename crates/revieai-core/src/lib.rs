pub mod review;
pub mod seed;
pub mod sort_key;
pub mod stats;

pub use review::{AISummaryData, NewReview, Product, Review, Sentiment};
pub use sort_key::{SortKey, filter_and_sort};
pub use stats::RatingStats;
