//! Single-slot reservoir sampling.
//!
//! [`ReservoirSelector`] implements Algorithm R with a reservoir of size one:
//! candidates are offered one at a time, and after `n` offers every offered
//! candidate is the current pick with probability exactly `1/n`. The length of
//! the sequence never needs to be known up front and memory use is constant.
//!
//! ## Why it is uniform
//!
//! The `i`-th candidate becomes the pick with probability `1/i` and then
//! survives each later offer `j` with probability `(j - 1)/j`:
//!
//! ```text
//! P(i wins) = 1/i * i/(i+1) * (i+1)/(i+2) * ... * (n-1)/n = 1/n
//! ```
//!
//! ## Example
//!
//! ```
//! use qotd_core::ReservoirSelector;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut selector = ReservoirSelector::new(StdRng::seed_from_u64(7));
//! for quote in ["We begin where we are.", "I'm your huckleberry."] {
//!     selector.offer(quote);
//! }
//! assert_eq!(selector.count(), 2);
//! assert!(selector.peek().is_some());
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform one-pass selector over a stream of candidates.
///
/// The selector owns its random generator. Use one selector per selection
/// pass; [`reset`](Self::reset) clears the pick but keeps the generator state,
/// so successive passes draw fresh numbers.
#[derive(Debug, Clone)]
pub struct ReservoirSelector<T, R = StdRng> {
    rng: R,
    count: u64,
    current: Option<T>,
}

impl<T, R> ReservoirSelector<T, R>
where
    R: Rng,
{
    /// Creates an empty selector drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            count: 0,
            current: None,
        }
    }

    /// Offers the next candidate and returns the current pick.
    ///
    /// The candidate replaces the pick when a uniform draw over `[0, n)`
    /// comes out as zero, `n` being the number of offers so far including
    /// this one. The first offer therefore always wins.
    pub fn offer(&mut self, candidate: T) -> &T {
        self.count += 1;
        let replace = self.rng.gen_range(0..self.count) == 0;
        let pick = match self.current.take() {
            Some(kept) if !replace => kept,
            _ => candidate,
        };
        self.current.insert(pick)
    }

    /// Clears the pick and the offer count.
    pub fn reset(&mut self) {
        self.count = 0;
        self.current = None;
    }

    /// Returns the current pick, if any candidate was offered.
    pub fn peek(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Number of candidates offered since creation or the last reset.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` when nothing has been offered yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Consumes the selector and returns the final pick.
    pub fn into_pick(self) -> Option<T> {
        self.current
    }
}

impl<T, R> ReservoirSelector<T, R>
where
    R: Rng + SeedableRng,
{
    /// Replaces the generator with one seeded from `seed` and resets.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
        self.reset();
    }
}

impl<T, R> Extend<T> for ReservoirSelector<T, R>
where
    R: Rng,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for candidate in iter {
            self.offer(candidate);
        }
    }
}

/// Picks one item of `iter` uniformly at random in a single pass.
///
/// Returns `None` for an empty iterator.
///
/// ```
/// use qotd_core::select_uniform;
/// use rand::rngs::mock::StepRng;
///
/// // A generator that always draws zero lets every offer win.
/// let last = select_uniform(1..=5, StepRng::new(0, 0));
/// assert_eq!(last, Some(5));
/// assert_eq!(select_uniform(std::iter::empty::<u8>(), StepRng::new(0, 0)), None);
/// ```
pub fn select_uniform<I, R>(iter: I, rng: R) -> Option<I::Item>
where
    I: IntoIterator,
    R: Rng,
{
    let mut selector = ReservoirSelector::new(rng);
    selector.extend(iter);
    selector.into_pick()
}
