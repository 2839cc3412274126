#![warn(missing_docs)]
//! # qotd
//!
//! Quote-of-the-day selection over a growing collection.
//!
//! A [`DailyPick`] slot picks one candidate uniformly at random from a
//! [`CandidateSource`](qotd_source::CandidateSource) and keeps returning it
//! for the rest of the day window. The pick is made again when the day rolls
//! over or when the picked candidate disappears from the source.
//! [`pick_any`] performs the same uniform selection without caching.
//!
//! ## Feature Flags
//!
//! - `metrics` - Record hit/miss counters and refresh timings with the
//!   [`metrics`](https://docs.rs/metrics) facade.

/// Slot configuration.
///
/// Provides [`PickConfig`](config::PickConfig) with:
/// - **Label** — slot name for logs and metrics
/// - **Day length** and **offset** — how time is cut into days
/// - **Seed** — reproducible pick sequence
pub mod config;

/// The daily cached pick slot.
///
/// See [`DailyPick`](daily::DailyPick) for the lookup state machine.
pub mod daily;

/// Error types for pick operations.
///
/// Defines [`PickError`] which covers:
/// - Empty sources (nothing to pick)
/// - Candidate source failures, passed through unchanged
pub mod error;

/// Metrics collection for pick slots.
///
/// When the `metrics` feature is enabled, this module provides counters
/// and histograms for hits, misses and refresh passes. Otherwise every
/// recording function is a no-op.
pub mod metrics;

/// Uncached one-shot picks.
pub mod random;

/// Pick outcome types used in logs and metrics.
pub mod status;

pub use config::{ConfigError, PickConfig, WindowOffset};
pub use daily::{DailyPick, DailyPickBuilder};
pub use error::PickError;
pub use random::pick_any;
pub use status::{MissReason, PickStatus};

pub use qotd_core::{
    Candidate, Clock, ConfiguredRng, DayKey, DayWindow, EntropyRng, FixedClock, ReservoirSelector,
    RngFactory, SeededRng, SlotLabel, SystemClock, WindowError, select_uniform,
};
pub use qotd_source::{CandidateSource, CandidateStream, SourceError, SourceResult};

/// The `qotd` prelude.
///
/// ```rust
/// use qotd::prelude::*;
/// ```
///
/// This imports:
/// - [`DailyPick`] — the daily cached pick slot
/// - [`PickError`] — error type for pick operations
/// - [`CandidateSource`] — trait for candidate collections
pub mod prelude {
    pub use crate::{CandidateSource, DailyPick, PickError};
}
