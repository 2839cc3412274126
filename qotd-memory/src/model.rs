use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted quote text, in characters.
pub const MAX_QUOTE_LEN: usize = 4096;

/// Longest accepted source name, in characters.
pub const MAX_SOURCE_NAME_LEN: usize = 1024;

/// A stored quote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Identifier assigned on insert.
    pub id: Uuid,
    /// Insert time.
    pub created: DateTime<Utc>,
    /// Quote text, trimmed.
    pub text: String,
}

/// A person or work a quote is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    /// Identifier assigned on insert.
    pub id: Uuid,
    /// Insert time.
    pub created: DateTime<Utc>,
    /// Display name, trimmed.
    pub name: String,
}

impl Quote {
    pub(crate) fn new(text: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            created: Utc::now(),
            text,
        }
    }
}

impl Source {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            created: Utc::now(),
            name,
        }
    }
}
