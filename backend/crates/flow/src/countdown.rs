//! Completion view selection and the eligibility countdown.
//!
//! When the terminal exercise step is reached the client asks the server for
//! its submission status and picks one of three views. A blocked submitter
//! sees a countdown that ticks once per second and flips to eligible the
//! instant the target epoch is reached.

/// Milliseconds in one second, the countdown tick interval.
pub const TICK_MS: i64 = 1_000;

/// View rendered once the exercise completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionView {
    /// The submitter may leave a sentiment note now.
    SentimentForm,
    /// A note was just accepted; show gratitude.
    ThankYou,
    /// Blocked inside the rolling window; count down to the target.
    Waiting(Countdown),
}

impl CompletionView {
    /// Select the view from a check-status response.
    ///
    /// `next_available` is the server-reported epoch-millisecond reopening
    /// instant. A blocked status without one degenerates to the thank-you
    /// view, since there is nothing to count down towards.
    #[must_use]
    pub fn from_status(can_submit_sentiment: bool, next_available: Option<i64>) -> Self {
        if can_submit_sentiment {
            Self::SentimentForm
        } else {
            match next_available {
                Some(target_epoch_ms) => Self::Waiting(Countdown { target_epoch_ms }),
                None => Self::ThankYou,
            }
        }
    }
}

/// Client-side ticking countdown towards an epoch-millisecond target.
///
/// The target comes from the server in epoch milliseconds precisely so the
/// comparison below never involves local timezone arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    target_epoch_ms: i64,
}

impl Countdown {
    /// Create a countdown towards `target_epoch_ms`.
    #[must_use]
    pub fn new(target_epoch_ms: i64) -> Self {
        Self { target_epoch_ms }
    }

    /// The reopening instant in epoch milliseconds.
    #[must_use]
    pub fn target_epoch_ms(&self) -> i64 {
        self.target_epoch_ms
    }

    /// Milliseconds left at `now_epoch_ms`, clamped to zero.
    #[must_use]
    pub fn remaining_ms(&self, now_epoch_ms: i64) -> i64 {
        (self.target_epoch_ms - now_epoch_ms).max(0)
    }

    /// Whether the submitter is eligible again at `now_epoch_ms`.
    #[must_use]
    pub fn is_elapsed(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms >= self.target_epoch_ms
    }

    /// One countdown tick: the view stays `Waiting` until the target is
    /// reached, then flips to the sentiment form.
    #[must_use]
    pub fn tick(self, now_epoch_ms: i64) -> CompletionView {
        if self.is_elapsed(now_epoch_ms) {
            CompletionView::SentimentForm
        } else {
            CompletionView::Waiting(self)
        }
    }
}
