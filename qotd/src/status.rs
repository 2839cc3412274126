//! Outcome of a daily pick lookup.

/// Why a lookup could not be served from the cached pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissReason {
    /// Nothing cached yet, or the slot was invalidated.
    Cold,
    /// The cached pick belongs to another day window.
    Rollover,
    /// The cached pick no longer exists in the source.
    Removed,
}

impl MissReason {
    /// Returns the reason as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            MissReason::Cold => "cold",
            MissReason::Rollover => "rollover",
            MissReason::Removed => "removed",
        }
    }
}

/// How a pick was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickStatus {
    /// Served from the cached pick.
    Hit,
    /// Served by a refresh pass.
    Miss(MissReason),
    /// Served by a refresh another caller finished while this one waited.
    Joined,
}

impl PickStatus {
    /// Returns the status as a string slice.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PickStatus::Hit => "hit",
            PickStatus::Miss(_) => "miss",
            PickStatus::Joined => "joined",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names() {
        assert_eq!(PickStatus::Hit.as_str(), "hit");
        assert_eq!(PickStatus::Joined.as_str(), "joined");
        for reason in [MissReason::Cold, MissReason::Rollover, MissReason::Removed] {
            assert_eq!(PickStatus::Miss(reason).as_str(), "miss");
        }
        assert_eq!(MissReason::Removed.as_str(), "removed");
    }
}
