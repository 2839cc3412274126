#![warn(missing_docs)]
//! # qotd-memory
//!
//! In-memory quote store for qotd.
//!
//! [`QuoteStore`] keeps quotes, their sources and the attributions between
//! them in concurrent maps. It implements
//! [`CandidateSource`](qotd_source::CandidateSource) over its quotes, so it can
//! back a [`DailyPick`](https://docs.rs/qotd) slot directly.
//!
//! ```
//! use qotd_memory::QuoteStore;
//!
//! let store = QuoteStore::new();
//! let quote = store.add_quote("We begin where we are.")?;
//! let source = store.add_source("Pema Chodron")?;
//! store.attach(quote.id, source.id)?;
//!
//! assert_eq!(store.sources_of(quote.id)?, vec![source]);
//! # Ok::<(), qotd_memory::StoreError>(())
//! ```
//!
//! Data is **not persisted** and is lost when the last clone of the store is
//! dropped.

mod error;
mod model;
mod store;

pub use error::{StoreError, StoreResult};
pub use model::{MAX_QUOTE_LEN, MAX_SOURCE_NAME_LEN, Quote, Source};
pub use store::QuoteStore;
