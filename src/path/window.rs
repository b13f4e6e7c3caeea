use thiserror::Error;

/// Inclusive distance range `[from, to]` requested for one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DistanceWindow {
    pub from: i64,
    pub to: i64,
}

impl DistanceWindow {
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    pub fn contains(self, distance: i64) -> bool {
        self.from <= distance && distance <= self.to
    }

    /// Same width, moved one distance step forward.
    #[must_use]
    pub const fn stepped(self) -> Self {
        Self {
            from: self.from.saturating_add(1),
            to: self.to.saturating_add(1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("\"From\" dist {from} cannot be greater than \"To\" dist {to}")]
    InvertedRange { from: i64, to: i64 },

    #[error("\"To\" dist {to} needs to be at most the known max dist {max}")]
    ExceedsKnownBound { to: i64, max: i64 },
}

impl RangeError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvertedRange { .. } => "INVERTED_RANGE",
            Self::ExceedsKnownBound { .. } => "EXCEEDS_KNOWN_BOUND",
        }
    }
}

pub fn validate(window: DistanceWindow, known_max_dist: i64) -> Result<(), RangeError> {
    if window.from > window.to {
        return Err(RangeError::InvertedRange {
            from: window.from,
            to: window.to,
        });
    }

    if window.to > known_max_dist {
        return Err(RangeError::ExceedsKnownBound {
            to: window.to,
            max: known_max_dist,
        });
    }

    Ok(())
}
