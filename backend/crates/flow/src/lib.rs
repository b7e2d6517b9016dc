//! State machines backing the Serenar client application.
//!
//! The client UI is a set of small, strictly local state machines: the
//! forward-only 5-4-3-2-1 grounding exercise, the completion view chosen from
//! a check-status response, the improvement-suggestion panel with its 1–10
//! rating, and the per-kind admin view. All of them are pure data and
//! transitions so they can be tested without any rendering or network layer.

pub mod admin;
pub mod countdown;
pub mod exercise;
pub mod improvement;

pub use admin::AdminFlow;
pub use countdown::{CompletionView, Countdown};
pub use exercise::{ExerciseFlow, Step, STEPS};
pub use improvement::{ImprovementPanel, Rating, RatingError};
