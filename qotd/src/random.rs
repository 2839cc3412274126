//! One-shot uniform picks over a candidate source.

use futures::TryStreamExt;
use qotd_core::ReservoirSelector;
use qotd_source::CandidateSource;
use rand::Rng;
use tracing::trace;

use crate::PickError;

/// Result of one full reservoir pass.
#[derive(Debug)]
pub(crate) struct Pass<T> {
    pub(crate) pick: T,
    pub(crate) offered: u64,
}

/// Streams every candidate of `source` through a fresh reservoir selector.
pub(crate) async fn reservoir_pass<S, R>(
    source: &S,
    rng: R,
) -> Result<Pass<S::Candidate>, PickError>
where
    S: CandidateSource + ?Sized,
    R: Rng + Send,
{
    let mut selector = ReservoirSelector::new(rng);
    let mut candidates = source.enumerate_all();
    while let Some(candidate) = candidates.try_next().await? {
        selector.offer(candidate);
    }
    let offered = selector.count();
    trace!(source = source.name(), offered, "reservoir pass finished");
    let pick = selector.into_pick().ok_or(PickError::EmptyCollection)?;
    Ok(Pass { pick, offered })
}

/// Picks any candidate of `source` uniformly at random, right now.
///
/// Unlike [`DailyPick`](crate::DailyPick) nothing is cached: every call
/// enumerates the whole source. Fails with [`PickError::EmptyCollection`]
/// when the source has no candidates.
pub async fn pick_any<S, R>(source: &S, rng: R) -> Result<S::Candidate, PickError>
where
    S: CandidateSource + ?Sized,
    R: Rng + Send,
{
    reservoir_pass(source, rng).await.map(|pass| pass.pick)
}
