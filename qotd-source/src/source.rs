use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use qotd_core::Candidate;

use crate::SourceError;

/// Result alias for candidate source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Stream of candidates produced by one enumeration pass.
pub type CandidateStream<'a, T> = BoxStream<'a, SourceResult<T>>;

/// Backing collection a pick slot selects from.
///
/// Implementations decide whether [`enumerate_all`](Self::enumerate_all) is
/// lazy (paging through storage) or eager (a snapshot). The order only has to
/// stay stable for the duration of one pass.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Item type handed out by this source.
    type Candidate: Candidate;

    /// Streams every candidate currently stored.
    fn enumerate_all(&self) -> CandidateStream<'_, Self::Candidate>;

    /// Reports whether `candidate` is still stored.
    async fn exists(&self, candidate: &Self::Candidate) -> SourceResult<bool>;

    /// Name of this source for log fields.
    fn name(&self) -> &str {
        "source"
    }
}

#[async_trait]
impl<S> CandidateSource for &S
where
    S: CandidateSource + ?Sized,
{
    type Candidate = S::Candidate;

    fn enumerate_all(&self) -> CandidateStream<'_, Self::Candidate> {
        (**self).enumerate_all()
    }

    async fn exists(&self, candidate: &Self::Candidate) -> SourceResult<bool> {
        (**self).exists(candidate).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<S> CandidateSource for Box<S>
where
    S: CandidateSource + ?Sized,
{
    type Candidate = S::Candidate;

    fn enumerate_all(&self) -> CandidateStream<'_, Self::Candidate> {
        (**self).enumerate_all()
    }

    async fn exists(&self, candidate: &Self::Candidate) -> SourceResult<bool> {
        (**self).exists(candidate).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[async_trait]
impl<S> CandidateSource for Arc<S>
where
    S: CandidateSource + ?Sized,
{
    type Candidate = S::Candidate;

    fn enumerate_all(&self) -> CandidateStream<'_, Self::Candidate> {
        (**self).enumerate_all()
    }

    async fn exists(&self, candidate: &Self::Candidate) -> SourceResult<bool> {
        (**self).exists(candidate).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Turns an in-memory snapshot into a [`CandidateStream`].
pub fn iter_stream<'a, I>(items: I) -> CandidateStream<'a, I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'a,
    I::Item: Send + 'a,
{
    stream::iter(items.into_iter().map(Ok)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    struct Fixed(Vec<u32>);

    #[async_trait]
    impl CandidateSource for Fixed {
        type Candidate = u32;

        fn enumerate_all(&self) -> CandidateStream<'_, u32> {
            iter_stream(self.0.iter().copied())
        }

        async fn exists(&self, candidate: &u32) -> SourceResult<bool> {
            Ok(self.0.contains(candidate))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    async fn collect<S: CandidateSource>(source: S) -> Vec<S::Candidate> {
        source.enumerate_all().try_collect().await.unwrap()
    }

    #[tokio::test]
    async fn forwarding_impls_delegate() {
        let fixed = Fixed(vec![3, 1, 2]);
        assert_eq!(collect(&fixed).await, vec![3, 1, 2]);

        let boxed: Box<dyn CandidateSource<Candidate = u32>> = Box::new(Fixed(vec![9]));
        assert_eq!(boxed.name(), "fixed");
        assert!(boxed.exists(&9).await.unwrap());
        assert!(!boxed.exists(&1).await.unwrap());

        let shared: Arc<dyn CandidateSource<Candidate = u32>> = Arc::new(Fixed(vec![4, 5]));
        assert_eq!(collect(shared).await, vec![4, 5]);
    }

    #[test]
    fn errors_are_transparent() {
        let error = SourceError::unavailable(std::io::Error::other("database is down"));
        assert_eq!(error.to_string(), "database is down");
    }
}
