//! Day windows and day keys.
//!
//! A [`DayWindow`] slices the timeline into fixed-length windows counted from
//! the Unix epoch. The [`DayKey`] of an instant is the index of the window it
//! falls in:
//!
//! ```text
//! day_key(now) = floor((now_ms + offset_ms) / length_ms)
//! ```
//!
//! With the default 24 hour length and zero offset, windows start at UTC
//! midnight. A non-zero offset shifts the boundary, e.g. `-5h` makes windows
//! start at midnight UTC-05:00. Keys are computed with Euclidean division, so
//! they are monotonic in `now` on both sides of the epoch.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Index of a fixed-length day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(i64);

impl DayKey {
    /// Wraps a raw window index.
    #[inline]
    pub const fn new(index: i64) -> Self {
        Self(index)
    }

    /// Returns the raw window index.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the key of the following window.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DayKey> for i64 {
    fn from(key: DayKey) -> Self {
        key.0
    }
}

/// Error returned when a window cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// The window length is zero or shorter than one millisecond.
    #[error("day window length must be at least one millisecond")]
    ZeroLength,
    /// The window length or offset does not fit in a signed millisecond count.
    #[error("day window length or offset is out of range")]
    OutOfRange,
}

/// Fixed-length partition of time into days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    length_ms: i64,
    offset_ms: i64,
}

impl DayWindow {
    /// UTC-aligned 24 hour windows.
    pub const UTC_DAYS: DayWindow = DayWindow {
        length_ms: MILLIS_PER_DAY,
        offset_ms: 0,
    };

    /// Builds windows of the given length with no offset.
    pub fn new(length: Duration) -> Result<Self, WindowError> {
        let length_ms = i64::try_from(length.as_millis()).map_err(|_| WindowError::OutOfRange)?;
        if length_ms == 0 {
            return Err(WindowError::ZeroLength);
        }
        Ok(Self {
            length_ms,
            offset_ms: 0,
        })
    }

    /// Shifts window boundaries east of UTC by `offset`.
    ///
    /// An offset of `+2h` makes a window start at midnight UTC+02:00.
    pub fn east(self, offset: Duration) -> Result<Self, WindowError> {
        let offset_ms = i64::try_from(offset.as_millis()).map_err(|_| WindowError::OutOfRange)?;
        Ok(Self { offset_ms, ..self })
    }

    /// Shifts window boundaries west of UTC by `offset`.
    pub fn west(self, offset: Duration) -> Result<Self, WindowError> {
        let offset_ms = i64::try_from(offset.as_millis()).map_err(|_| WindowError::OutOfRange)?;
        Ok(Self {
            offset_ms: -offset_ms,
            ..self
        })
    }

    /// Window length.
    pub fn length(&self) -> Duration {
        Duration::from_millis(self.length_ms.unsigned_abs())
    }

    /// Signed offset in milliseconds, positive east of UTC.
    pub fn offset_millis(&self) -> i64 {
        self.offset_ms
    }

    /// Returns the key of the window containing `now`.
    ///
    /// Indices outside `i64` saturate, so keys never decrease as `now` moves
    /// forward.
    pub fn day_key(&self, now: DateTime<Utc>) -> DayKey {
        let shifted = i128::from(now.timestamp_millis()) + i128::from(self.offset_ms);
        let index = shifted.div_euclid(i128::from(self.length_ms));
        DayKey(i64::try_from(index).unwrap_or(if index < 0 { i64::MIN } else { i64::MAX }))
    }

    /// Returns the first instant of window `key`, or `None` when it is not
    /// representable.
    pub fn start_of(&self, key: DayKey) -> Option<DateTime<Utc>> {
        let start_ms = i128::from(key.0) * i128::from(self.length_ms) - i128::from(self.offset_ms);
        let start_ms = i64::try_from(start_ms).ok()?;
        DateTime::<Utc>::from_timestamp_millis(start_ms)
    }

    /// Time remaining from `now` until the next window starts.
    pub fn until_next(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let next = self.start_of(self.day_key(now).next())?;
        Some(next - now)
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::UTC_DAYS
    }
}
