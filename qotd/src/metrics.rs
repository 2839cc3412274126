//! Metrics declaration and recording.

use std::time::Duration;

use qotd_core::SlotLabel;

use crate::status::PickStatus;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
lazy_static! {
    /// Track number of picks served from the cached pick.
    pub static ref PICK_HIT_COUNTER: &'static str = {
        metrics::describe_counter!(
            "qotd_pick_hit_total",
            "Total number of picks served from the cached pick."
        );
        "qotd_pick_hit_total"
    };
    /// Track number of picks that required a refresh.
    pub static ref PICK_MISS_COUNTER: &'static str = {
        metrics::describe_counter!(
            "qotd_pick_miss_total",
            "Total number of picks that required a refresh pass."
        );
        "qotd_pick_miss_total"
    };
    /// Track number of picks served by a concurrent caller's refresh.
    pub static ref PICK_JOINED_COUNTER: &'static str = {
        metrics::describe_counter!(
            "qotd_pick_joined_total",
            "Total number of picks served by a refresh another caller completed."
        );
        "qotd_pick_joined_total"
    };
    /// Track number of refreshes that found no candidates.
    pub static ref PICK_EMPTY_COUNTER: &'static str = {
        metrics::describe_counter!(
            "qotd_pick_empty_total",
            "Total number of refresh passes over an empty source."
        );
        "qotd_pick_empty_total"
    };
    /// Track number of completed refresh passes.
    pub static ref REFRESH_COUNTER: &'static str = {
        metrics::describe_counter!(
            "qotd_refresh_total",
            "Total number of completed refresh passes."
        );
        "qotd_refresh_total"
    };
    /// Histogram of refresh pass duration.
    pub static ref REFRESH_DURATION: &'static str = {
        metrics::describe_histogram!(
            "qotd_refresh_duration_seconds",
            metrics::Unit::Seconds,
            "Duration of refresh passes in seconds."
        );
        "qotd_refresh_duration_seconds"
    };
    /// Histogram of candidates offered per refresh pass.
    pub static ref REFRESH_CANDIDATES: &'static str = {
        metrics::describe_histogram!(
            "qotd_refresh_candidates",
            metrics::Unit::Count,
            "Number of candidates offered per refresh pass."
        );
        "qotd_refresh_candidates"
    };
}

/// Records how a pick was served.
///
/// When the `metrics` feature is disabled, this function is a no-op.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_pick(slot: &SlotLabel, status: PickStatus) {
    match status {
        PickStatus::Hit => {
            metrics::counter!(*PICK_HIT_COUNTER, "slot" => slot.to_string()).increment(1)
        }
        PickStatus::Miss(reason) => metrics::counter!(
            *PICK_MISS_COUNTER,
            "slot" => slot.to_string(),
            "reason" => reason.as_str()
        )
        .increment(1),
        PickStatus::Joined => {
            metrics::counter!(*PICK_JOINED_COUNTER, "slot" => slot.to_string()).increment(1)
        }
    }
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_pick(_slot: &SlotLabel, _status: PickStatus) {}

/// Records a completed refresh pass.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_refresh(slot: &SlotLabel, duration: Duration, candidates: u64) {
    metrics::counter!(*REFRESH_COUNTER, "slot" => slot.to_string()).increment(1);
    metrics::histogram!(*REFRESH_DURATION, "slot" => slot.to_string())
        .record(duration.as_secs_f64());
    metrics::histogram!(*REFRESH_CANDIDATES, "slot" => slot.to_string()).record(candidates as f64);
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_refresh(_slot: &SlotLabel, _duration: Duration, _candidates: u64) {}

/// Records a refresh pass that found nothing to pick.
#[cfg(feature = "metrics")]
#[inline]
pub fn record_empty(slot: &SlotLabel) {
    metrics::counter!(*PICK_EMPTY_COUNTER, "slot" => slot.to_string()).increment(1);
}

/// No-op version when metrics feature is disabled.
#[cfg(not(feature = "metrics"))]
#[inline]
pub fn record_empty(_slot: &SlotLabel) {}
