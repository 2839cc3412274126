use qotd_source::SourceError;
use thiserror::Error;

/// Errors returned by pick operations.
#[derive(Debug, Error)]
pub enum PickError {
    /// The source holds no candidates, so there is nothing to pick.
    #[error("no candidates available to pick from")]
    EmptyCollection,
    /// The candidate source failed; the error is passed through unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl PickError {
    /// Returns `true` for [`PickError::EmptyCollection`].
    pub fn is_empty_collection(&self) -> bool {
        matches!(self, Self::EmptyCollection)
    }
}
