//! Traits and types for candidate sources.
//!
//! A pick slot does not store candidates itself. It reads them from a
//! [`CandidateSource`], which only has to do two things: enumerate every
//! current candidate once, and tell whether a previously returned candidate
//! still exists. If you want to plug in your own storage, you are in the right
//! place.
mod source;

pub use source::{CandidateSource, CandidateStream, SourceResult, iter_stream};
use thiserror::Error;

/// Errors raised by a candidate source.
///
/// The pick slot never interprets these; they reach the caller unchanged.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached (connection, I/O, timeout).
    #[error(transparent)]
    Unavailable(Box<dyn std::error::Error + Send + Sync>),
    /// Internal source error, state or decoding failure.
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Wraps any error as [`SourceError::Unavailable`].
    pub fn unavailable<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Unavailable(error.into())
    }

    /// Wraps any error as [`SourceError::Internal`].
    pub fn internal<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Internal(error.into())
    }
}
