//! Feedback records and the kind discriminator.
//!
//! Two flat record shapes exist: sentiment notes (repeatable per address
//! behind a rolling 2-hour window) and app-improvement suggestions (at most
//! one per address, ever). Both share the same column layout, so the listing
//! and export paths operate on a single [`FeedbackRecord`] type selected by
//! [`FeedbackKind`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Rolling window between successive sentiment submissions from one address.
pub const SUBMISSION_WINDOW_MS: i64 = 2 * 60 * 60 * 1000;

/// Discriminator selecting which feedback table a request targets.
///
/// Anything other than the literal `sentiment` means the app-improvement
/// table; the client sends `improvement` but the server treats every
/// non-sentiment value the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// A sentiment note captured after the grounding exercise.
    Sentiment,
    /// An app-improvement suggestion.
    App,
}

impl FeedbackKind {
    /// Parse a client-supplied kind string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "sentiment" {
            Self::Sentiment
        } else {
            Self::App
        }
    }

    /// Canonical slug used in export filenames and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sentiment => "sentiment",
            Self::App => "app",
        }
    }
}

impl std::fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored feedback row, independent of which table it came from.
///
/// Field names deliberately match the column names so the admin listing
/// serialises rows exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRecord {
    /// Surrogate key assigned by the store.
    pub id: i32,
    /// Submitted feedback text, stored as received.
    pub content: String,
    /// Submitter network address as observed by the server.
    pub ip: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Eligibility snapshot for one submitter address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionStatus {
    /// Whether an app-improvement suggestion may still be submitted.
    pub can_submit_app: bool,
    /// Whether a sentiment note may be submitted right now.
    pub can_submit_sentiment: bool,
    /// Epoch-millisecond instant at which sentiment submission reopens.
    ///
    /// Expressed in epoch milliseconds so client and server clocks cannot
    /// disagree about timezones. `None` whenever `can_submit_sentiment`.
    pub next_available: Option<i64>,
}

impl SubmissionStatus {
    /// Next-available instant for a sentiment row created at `last`.
    #[must_use]
    pub fn next_available_after(last: DateTime<Utc>) -> i64 {
        last.timestamp_millis() + SUBMISSION_WINDOW_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("sentiment", FeedbackKind::Sentiment)]
    #[case("improvement", FeedbackKind::App)]
    #[case("app", FeedbackKind::App)]
    #[case("anything-else", FeedbackKind::App)]
    #[case("", FeedbackKind::App)]
    fn parses_kind_with_sentiment_as_the_only_special_case(
        #[case] raw: &str,
        #[case] expected: FeedbackKind,
    ) {
        assert_eq!(FeedbackKind::parse(raw), expected);
    }

    #[rstest]
    fn next_available_adds_the_two_hour_window() {
        let last = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid");
        assert_eq!(
            SubmissionStatus::next_available_after(last),
            last.timestamp_millis() + 7_200_000
        );
    }

    #[rstest]
    fn record_serialises_with_column_names() {
        let record = FeedbackRecord {
            id: 7,
            content: "feeling calm".into(),
            ip: "1.2.3.4".into(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().expect("valid"),
        };
        let value = serde_json::to_value(&record).expect("serialisable");
        assert_eq!(value.get("id").and_then(serde_json::Value::as_i64), Some(7));
        assert!(value.get("created_at").is_some());
        assert!(value.get("createdAt").is_none());
    }
}
