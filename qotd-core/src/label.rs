//! Slot label type for identifying pick slots.
//!
//! `SlotLabel` is a newtype wrapper around `SmolStr` naming one daily pick
//! slot (e.g. `"qod"`) in log fields and metric labels.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A label identifying a pick slot.
///
/// # Example
/// ```
/// use qotd_core::SlotLabel;
///
/// let label = SlotLabel::new("qod");
/// assert_eq!(label.as_str(), "qod");
/// assert_eq!(label.to_string(), "qod");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotLabel(SmolStr);

impl SlotLabel {
    /// Creates a new slot label.
    #[inline]
    pub fn new(s: impl Into<SmolStr>) -> Self {
        Self(s.into())
    }

    /// Creates a slot label from a static string (no allocation).
    #[inline]
    pub const fn new_static(s: &'static str) -> Self {
        Self(SmolStr::new_static(s))
    }

    /// Returns the label as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SlotLabel {
    fn default() -> Self {
        Self::new_static("default")
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SlotLabel {
    #[inline]
    fn from(s: &str) -> Self {
        Self(SmolStr::new(s))
    }
}

impl From<String> for SlotLabel {
    #[inline]
    fn from(s: String) -> Self {
        Self(SmolStr::from(s))
    }
}

impl AsRef<str> for SlotLabel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
