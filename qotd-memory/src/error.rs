use thiserror::Error;
use uuid::Uuid;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by [`QuoteStore`](crate::QuoteStore) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No quote with this id.
    #[error("quote {0} not found")]
    QuoteNotFound(Uuid),
    /// No source with this id.
    #[error("source {0} not found")]
    SourceNotFound(Uuid),
    /// Quote text or source name is empty after trimming.
    #[error("text must not be blank")]
    BlankText,
    /// Quote text or source name exceeds its length limit.
    #[error("text is longer than {limit} characters")]
    TooLong {
        /// Maximum number of characters allowed.
        limit: usize,
    },
    /// Another quote already has this text, ignoring case.
    #[error("quote already exists: {0:?}")]
    DuplicateQuote(String),
    /// Another source already has this name, ignoring case.
    #[error("source already exists: {0:?}")]
    DuplicateSource(String),
    /// The source is not attributed to the quote.
    #[error("source {source_id} is not attached to quote {quote_id}")]
    NotAttached {
        /// Quote that was expected to carry the attribution.
        quote_id: Uuid,
        /// Source that was expected to be attached.
        source_id: Uuid,
    },
}
