//! The improvement-suggestion panel.
//!
//! An independently triggerable affordance, gated by the server-reported
//! `canSubmitApp` flag, that collects free text plus a 1–10 rating. After a
//! successful submission it shows a thank-you state for a fixed duration and
//! then resets.

/// How long the thank-you state stays on screen, in milliseconds.
pub const THANK_YOU_DISPLAY_MS: i64 = 4_000;

/// A 1–10 app rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

/// Validation errors raised when constructing a [`Rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    /// The value lies outside 1..=10.
    #[error("rating must be between 1 and 10, got {0}")]
    OutOfRange(u8),
}

impl Rating {
    /// Validate a raw rating value.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::OutOfRange`] for values outside 1..=10.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (1..=10).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError::OutOfRange(value))
        }
    }

    /// The validated value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

/// State of the improvement-suggestion panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImprovementPanel {
    /// Collapsed; the affordance may be unavailable entirely.
    Closed,
    /// Collecting text and a rating.
    Open,
    /// Submission accepted; resets once `until_epoch_ms` passes.
    ThankYou {
        /// Instant at which the panel resets to [`ImprovementPanel::Closed`].
        until_epoch_ms: i64,
    },
}

impl ImprovementPanel {
    /// Open the panel. Refused while `can_submit_app` is false, which is how
    /// the `canSubmitApp` gate from check-status is enforced locally.
    #[must_use]
    pub fn open(self, can_submit_app: bool) -> Self {
        if can_submit_app && self == Self::Closed {
            Self::Open
        } else {
            self
        }
    }

    /// Record a successful submission at `now_epoch_ms`.
    #[must_use]
    pub fn submitted(self, now_epoch_ms: i64) -> Self {
        match self {
            Self::Open => Self::ThankYou {
                until_epoch_ms: now_epoch_ms + THANK_YOU_DISPLAY_MS,
            },
            other => other,
        }
    }

    /// Advance the clock; the thank-you state resets once its deadline
    /// passes. Every other state is unaffected by time.
    #[must_use]
    pub fn tick(self, now_epoch_ms: i64) -> Self {
        match self {
            Self::ThankYou { until_epoch_ms } if now_epoch_ms >= until_epoch_ms => Self::Closed,
            other => other,
        }
    }
}
