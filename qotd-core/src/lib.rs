#![warn(missing_docs)]
//! # qotd-core
//!
//! Core types for the qotd daily pick framework.
//!
//! This crate holds the pieces that do not depend on where candidates are
//! stored:
//!
//! - **Select** one item uniformly from a stream of unknown length
//!   ([`ReservoirSelector`], [`select_uniform`])
//! - **Partition** time into fixed-length days ([`DayWindow`], [`DayKey`])
//! - **Inject** randomness and time ([`RngFactory`], [`Clock`])
//! - **Name** pick slots in logs and metrics ([`SlotLabel`])

pub mod clock;
pub mod day;
pub mod label;
pub mod reservoir;
pub mod rng;

pub use clock::{Clock, FixedClock, SystemClock};
pub use day::{DayKey, DayWindow, WindowError};
pub use label::SlotLabel;
pub use reservoir::{ReservoirSelector, select_uniform};
pub use rng::{ConfiguredRng, EntropyRng, RngFactory, SeededRng};

/// Marker for values a pick slot can select and cache.
///
/// Candidates are compared by equality only; their content is never inspected.
pub trait Candidate: Clone + PartialEq + Send + Sync + 'static {}

impl<T> Candidate for T where T: Clone + PartialEq + Send + Sync + 'static {}
