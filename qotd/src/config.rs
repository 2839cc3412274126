//! Pick slot configuration.
//!
//! [`PickConfig`] is the serializable description of one pick slot: its label,
//! how days are cut, and whether its random sequence is reproducible. It is
//! usually deserialized from a YAML or JSON document:
//!
//! ```yaml
//! label: qod
//! day_length: 24h
//! offset:
//!   west: 5h
//! seed: 42
//! ```

use std::time::Duration;

use qotd_core::{ConfiguredRng, DayWindow, SlotLabel, WindowError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a [`PickConfig`] into runtime values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured day window is invalid.
    #[error("invalid day window: {0}")]
    Window(#[from] WindowError),
}

/// Shift of day boundaries relative to UTC midnight.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum WindowOffset {
    /// Days start this long before UTC midnight (e.g. `2h` for UTC+02:00).
    East(#[serde(with = "humantime_serde")] Duration),
    /// Days start this long after UTC midnight (e.g. `5h` for UTC-05:00).
    West(#[serde(with = "humantime_serde")] Duration),
}

/// Configuration of a single pick slot.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct PickConfig {
    /// Slot name used in log fields and metric labels.
    pub label: SlotLabel,
    /// Length of one day window (e.g. "24h", "1h", "30m").
    #[serde(with = "humantime_serde")]
    pub day_length: Duration,
    /// Optional shift of window boundaries away from UTC midnight.
    pub offset: Option<WindowOffset>,
    /// Seed for a reproducible pick sequence. Entropy-seeded when unset.
    pub seed: Option<u64>,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            label: SlotLabel::new_static("qod"),
            day_length: Duration::from_secs(24 * 60 * 60),
            offset: None,
            seed: None,
        }
    }
}

impl PickConfig {
    /// Builds the day window described by this configuration.
    pub fn window(&self) -> Result<DayWindow, ConfigError> {
        let window = DayWindow::new(self.day_length)?;
        let window = match self.offset {
            None => window,
            Some(WindowOffset::East(offset)) => window.east(offset)?,
            Some(WindowOffset::West(offset)) => window.west(offset)?,
        };
        Ok(window)
    }

    /// Builds the random generator factory described by this configuration.
    pub fn rng(&self) -> ConfiguredRng {
        ConfiguredRng::from_seed(self.seed)
    }
}
