//! Daily cached pick over a candidate source.
//!
//! A [`DailyPick`] owns a single cached pick together with the [`DayKey`] it
//! was made for. Lookups go through two states:
//!
//! ```text
//!            pick_at(now), refresh ok
//!   STALE ─────────────────────────────► FRESH
//!     ▲                                    │
//!     │  day changed, pick removed         │ same day, pick exists
//!     │  from the source, invalidate()     ▼
//!     └─────────────────────────────────  FRESH
//! ```
//!
//! A refresh enumerates the whole source once and runs it through a fresh
//! [`ReservoirSelector`](qotd_core::ReservoirSelector). Refreshes on one slot
//! are serialized: callers that find the slot stale while another caller is
//! refreshing wait for it and reuse its result instead of enumerating again.

use std::fmt;
use std::time::Instant;

use chrono::{DateTime, Utc};
use qotd_core::{Clock, ConfiguredRng, DayKey, DayWindow, RngFactory, SlotLabel, SystemClock};
use qotd_source::CandidateSource;
use tokio::sync::{Mutex, RwLock};
use tracing::{Instrument, debug, info_span, trace, warn};

use crate::config::{ConfigError, PickConfig};
use crate::metrics::{record_empty, record_pick, record_refresh};
use crate::random::reservoir_pass;
use crate::PickError;
use crate::status::{MissReason, PickStatus};

#[derive(Debug, Clone)]
struct CachedPick<T> {
    item: T,
    day: DayKey,
}

#[derive(Debug)]
struct Slot<T> {
    pick: Option<CachedPick<T>>,
    // Bumped on every write so waiting refreshers can tell the slot moved on.
    generation: u64,
}

/// Quote-of-the-day style pick slot.
///
/// Returns the same candidate for every lookup within one day window, as long
/// as that candidate still exists in the source. Build one per slot at
/// startup and share it by reference or `Arc`.
///
/// # Type Parameters
///
/// * `S` - Candidate source. Implements [`CandidateSource`].
/// * `F` - Random generator factory, one generator per refresh.
///   Default: [`ConfiguredRng`].
/// * `C` - Clock used by [`pick_today`](Self::pick_today).
///   Default: [`SystemClock`].
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use qotd::DailyPick;
/// use qotd_memory::QuoteStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = QuoteStore::new();
/// store.add_quote("We begin where we are.")?;
/// store.add_quote("I'm your huckleberry.")?;
///
/// let qod = DailyPick::builder(store).build();
/// let now = Utc::now();
/// let first = qod.pick_at(now).await?;
/// assert_eq!(qod.pick_at(now).await?, first);
/// # Ok(())
/// # }
/// ```
pub struct DailyPick<S, F = ConfiguredRng, C = SystemClock>
where
    S: CandidateSource,
{
    source: S,
    rng: F,
    clock: C,
    window: DayWindow,
    label: SlotLabel,
    slot: RwLock<Slot<S::Candidate>>,
    refresh: Mutex<()>,
}

impl<S, F, C> fmt::Debug for DailyPick<S, F, C>
where
    S: CandidateSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DailyPick")
            .field("label", &self.label)
            .field("source", &self.source.name())
            .field("window", &self.window)
            .field("rng", &std::any::type_name::<F>())
            .field("clock", &std::any::type_name::<C>())
            .finish()
    }
}

impl<S> DailyPick<S>
where
    S: CandidateSource,
{
    /// Creates a new [`DailyPickBuilder`] over `source`.
    pub fn builder(source: S) -> DailyPickBuilder<S> {
        DailyPickBuilder::new(source)
    }

    /// Builds a slot over `source` from a [`PickConfig`].
    pub fn from_config(source: S, config: &PickConfig) -> Result<Self, ConfigError> {
        Ok(DailyPick::builder(source).config(config)?.build())
    }
}

impl<S, F, C> DailyPick<S, F, C>
where
    S: CandidateSource,
    F: RngFactory,
    C: Clock,
{
    /// Returns the pick for the day window containing `now`.
    ///
    /// Serves the cached pick when it was made for the same day and the
    /// source still reports it as existing. Otherwise runs a refresh pass.
    ///
    /// # Errors
    ///
    /// - [`PickError::EmptyCollection`] when a refresh finds no candidates.
    /// - [`PickError::Source`] when the source fails; the slot stays stale.
    pub async fn pick_at(&self, now: DateTime<Utc>) -> Result<S::Candidate, PickError> {
        let day = self.window.day_key(now);
        let (cached, generation) = {
            let slot = self.slot.read().await;
            (slot.pick.clone(), slot.generation)
        };

        let reason = match cached {
            Some(cached) if cached.day == day => {
                if self.source.exists(&cached.item).await? {
                    let status = PickStatus::Hit;
                    trace!(
                        slot = %self.label,
                        %day,
                        status = status.as_str(),
                        "daily pick served"
                    );
                    record_pick(&self.label, status);
                    return Ok(cached.item);
                }
                MissReason::Removed
            }
            Some(_) => MissReason::Rollover,
            None => MissReason::Cold,
        };

        self.refresh(day, generation, reason).await
    }

    /// Returns the pick for the current day according to the slot's clock.
    pub async fn pick_today(&self) -> Result<S::Candidate, PickError> {
        self.pick_at(self.clock.now()).await
    }

    /// Drops the cached pick so the next lookup refreshes.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.pick = None;
        slot.generation += 1;
        debug!(slot = %self.label, "daily pick invalidated");
    }

    /// Returns the cached pick and its day without checking freshness.
    pub async fn cached(&self) -> Option<(S::Candidate, DayKey)> {
        let slot = self.slot.read().await;
        slot.pick
            .as_ref()
            .map(|cached| (cached.item.clone(), cached.day))
    }

    async fn refresh(
        &self,
        day: DayKey,
        seen_generation: u64,
        reason: MissReason,
    ) -> Result<S::Candidate, PickError> {
        let _guard = self.refresh.lock().await;

        {
            let slot = self.slot.read().await;
            if slot.generation != seen_generation {
                if let Some(cached) = slot.pick.as_ref().filter(|cached| cached.day == day) {
                    let status = PickStatus::Joined;
                    debug!(
                        slot = %self.label,
                        %day,
                        status = status.as_str(),
                        "joined refresh of a concurrent caller"
                    );
                    record_pick(&self.label, status);
                    return Ok(cached.item.clone());
                }
            }
        }

        let span = info_span!(
            "qotd.refresh",
            slot = %self.label,
            source = self.source.name(),
            %day,
            reason = reason.as_str()
        );
        let started = Instant::now();
        let pass = match reservoir_pass(&self.source, self.rng.fresh())
            .instrument(span)
            .await
        {
            Ok(pass) => pass,
            Err(PickError::EmptyCollection) => {
                warn!(slot = %self.label, %day, "no candidates to pick from");
                record_empty(&self.label);
                return Err(PickError::EmptyCollection);
            }
            Err(error) => {
                warn!(slot = %self.label, %day, %error, "refresh failed");
                return Err(error);
            }
        };

        let mut slot = self.slot.write().await;
        slot.pick = Some(CachedPick {
            item: pass.pick.clone(),
            day,
        });
        slot.generation += 1;
        drop(slot);

        let status = PickStatus::Miss(reason);
        debug!(
            slot = %self.label,
            %day,
            status = status.as_str(),
            reason = reason.as_str(),
            candidates = pass.offered,
            "daily pick refreshed"
        );
        record_pick(&self.label, status);
        record_refresh(&self.label, started.elapsed(), pass.offered);
        Ok(pass.pick)
    }
}

impl<S, F, C> DailyPick<S, F, C>
where
    S: CandidateSource,
{
    /// Slot name used in logs and metrics.
    pub fn label(&self) -> &SlotLabel {
        &self.label
    }

    /// Day window the slot is keyed by.
    pub fn window(&self) -> &DayWindow {
        &self.window
    }

    /// The candidate source backing this slot.
    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Builder for [`DailyPick`].
///
/// Use [`DailyPick::builder`] to create a new builder. Defaults: entropy-seeded
/// generators, the system clock, UTC-aligned 24 hour days and the `qod` label.
pub struct DailyPickBuilder<S, F = ConfiguredRng, C = SystemClock> {
    source: S,
    rng: F,
    clock: C,
    window: DayWindow,
    label: SlotLabel,
}

impl<S> DailyPickBuilder<S> {
    /// Creates a new builder over `source` with default settings.
    pub fn new(source: S) -> Self {
        Self {
            source,
            rng: ConfiguredRng::default(),
            clock: SystemClock,
            window: DayWindow::default(),
            label: PickConfig::default().label,
        }
    }
}

impl<S, F, C> DailyPickBuilder<S, F, C> {
    /// Sets the random generator factory.
    pub fn rng<NewF>(self, rng: NewF) -> DailyPickBuilder<S, NewF, C> {
        DailyPickBuilder {
            source: self.source,
            rng,
            clock: self.clock,
            window: self.window,
            label: self.label,
        }
    }

    /// Sets the clock used by [`DailyPick::pick_today`].
    pub fn clock<NewC>(self, clock: NewC) -> DailyPickBuilder<S, F, NewC> {
        DailyPickBuilder {
            source: self.source,
            rng: self.rng,
            clock,
            window: self.window,
            label: self.label,
        }
    }

    /// Sets the day window.
    pub fn window(self, window: DayWindow) -> Self {
        Self { window, ..self }
    }

    /// Sets the slot label.
    pub fn label(self, label: impl Into<SlotLabel>) -> Self {
        Self {
            label: label.into(),
            ..self
        }
    }

    /// Applies label, day window and seed from `config`.
    pub fn config(
        self,
        config: &PickConfig,
    ) -> Result<DailyPickBuilder<S, ConfiguredRng, C>, ConfigError> {
        let window = config.window()?;
        Ok(self
            .rng(config.rng())
            .window(window)
            .label(config.label.clone()))
    }
}

impl<S, F, C> DailyPickBuilder<S, F, C>
where
    S: CandidateSource,
    F: RngFactory,
    C: Clock,
{
    /// Builds the [`DailyPick`]. The slot starts stale.
    pub fn build(self) -> DailyPick<S, F, C> {
        DailyPick {
            source: self.source,
            rng: self.rng,
            clock: self.clock,
            window: self.window,
            label: self.label,
            slot: RwLock::new(Slot {
                pick: None,
                generation: 0,
            }),
            refresh: Mutex::new(()),
        }
    }
}
