//! Random generator factories.
//!
//! A pick slot never shares a generator between refreshes. Instead it holds an
//! [`RngFactory`] and asks it for a fresh, instance-confined generator each time
//! it runs a reservoir pass.
//!
//! - [`EntropyRng`] seeds every generator from OS entropy.
//! - [`SeededRng`] hands out a reproducible sequence of generators derived from
//!   one seed, so a slot's whole selection history can be replayed.
//! - Any `Fn() -> R` closure works as a factory, which is how tests inject
//!   scripted generators.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of per-pass random generators.
pub trait RngFactory: Send + Sync {
    /// Generator type handed to one selection pass.
    type Rng: Rng + Send;

    /// Returns a new generator for one selection pass.
    fn fresh(&self) -> Self::Rng;
}

impl<F, R> RngFactory for F
where
    F: Fn() -> R + Send + Sync,
    R: Rng + Send,
{
    type Rng = R;

    fn fresh(&self) -> R {
        self()
    }
}

/// Factory seeding each generator from OS entropy.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyRng;

impl RngFactory for EntropyRng {
    type Rng = StdRng;

    fn fresh(&self) -> StdRng {
        StdRng::from_entropy()
    }
}

/// Factory producing a deterministic sequence of generators.
///
/// The `i`-th generator (counting from zero) is `StdRng` seeded with
/// `seed + i`, wrapping on overflow.
///
/// ```
/// use qotd_core::rng::{RngFactory, SeededRng};
/// use rand::Rng;
///
/// let a = SeededRng::new(11);
/// let b = SeededRng::new(11);
/// let first: u64 = a.fresh().r#gen();
/// assert_eq!(first, b.fresh().r#gen::<u64>());
/// assert_eq!(a.issued(), 1);
/// ```
#[derive(Debug)]
pub struct SeededRng {
    seed: u64,
    issued: AtomicU64,
}

impl SeededRng {
    /// Creates a factory whose first generator is seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            issued: AtomicU64::new(0),
        }
    }

    /// Base seed of the sequence.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generators handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

impl Clone for SeededRng {
    fn clone(&self) -> Self {
        Self {
            seed: self.seed,
            issued: AtomicU64::new(self.issued()),
        }
    }
}

impl RngFactory for SeededRng {
    type Rng = StdRng;

    fn fresh(&self) -> StdRng {
        let index = self.issued.fetch_add(1, Ordering::Relaxed);
        StdRng::seed_from_u64(self.seed.wrapping_add(index))
    }
}

/// Either an entropy-seeded or a seeded factory, picked at runtime from
/// configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredRng {
    /// See [`EntropyRng`].
    Entropy(EntropyRng),
    /// See [`SeededRng`].
    Seeded(SeededRng),
}

impl ConfiguredRng {
    /// Seeded when `seed` is set, entropy-seeded otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededRng::new(seed)),
            None => Self::Entropy(EntropyRng),
        }
    }
}

impl Default for ConfiguredRng {
    fn default() -> Self {
        Self::Entropy(EntropyRng)
    }
}

impl RngFactory for ConfiguredRng {
    type Rng = StdRng;

    fn fresh(&self) -> StdRng {
        match self {
            Self::Entropy(factory) => factory.fresh(),
            Self::Seeded(factory) => factory.fresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    #[test]
    fn seeded_sequence_advances() {
        let factory = SeededRng::new(5);
        let mut first = factory.fresh();
        let mut second = factory.fresh();
        assert_eq!(factory.issued(), 2);

        let mut expected_first = StdRng::seed_from_u64(5);
        let mut expected_second = StdRng::seed_from_u64(6);
        assert_eq!(first.next_u64(), expected_first.next_u64());
        assert_eq!(second.next_u64(), expected_second.next_u64());
    }

    #[test]
    fn seeded_wraps_on_overflow() {
        let factory = SeededRng::new(u64::MAX);
        let _ = factory.fresh();
        let mut wrapped = factory.fresh();
        assert_eq!(wrapped.next_u64(), StdRng::seed_from_u64(0).next_u64());
    }

    #[test]
    fn closures_are_factories() {
        let factory = || rand::rngs::mock::StepRng::new(7, 0);
        assert_eq!(factory.fresh().next_u64(), 7);
    }

    #[test]
    fn configured_from_seed() {
        assert!(matches!(ConfiguredRng::from_seed(None), ConfiguredRng::Entropy(_)));
        let configured = ConfiguredRng::from_seed(Some(3));
        assert_eq!(
            configured.fresh().next_u64(),
            StdRng::seed_from_u64(3).next_u64()
        );
    }
}
