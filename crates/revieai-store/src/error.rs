use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("review id already in use: {0}")]
    DuplicateId(String),

    #[error("rating {0} is outside 1..=5")]
    InvalidRating(u8),

    #[error("no review with id {0}")]
    NotFound(String),

    #[error("review {0} already has a merchant reply")]
    ReplyAlreadySet(String),
}
