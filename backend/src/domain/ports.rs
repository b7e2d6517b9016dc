//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning raw driver errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::feedback::{FeedbackKind, FeedbackRecord};

/// Errors surfaced by the feedback persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackRepositoryError {
    /// Database connectivity failures, including pool checkout.
    #[error("feedback store connection failed: {message}")]
    Connection {
        /// Adapter-level description, logged but never shown to callers.
        message: String,
    },
    /// Query or write failures that bubble up from the adapter.
    #[error("feedback store query failed: {message}")]
    Query {
        /// Adapter-level description, logged but never shown to callers.
        message: String,
    },
    /// The app-feedback unique-per-ip constraint rejected the insert.
    #[error("an app suggestion already exists for this address")]
    DuplicateIp,
}

impl FeedbackRepositoryError {
    /// Helper for connection related adapter errors.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Outcome of the conditional sentiment insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentInsert {
    /// The row was inserted.
    Inserted,
    /// A row newer than the cutoff already exists; nothing was written.
    RateLimited {
        /// Timestamp of the blocking row.
        last_submitted_at: DateTime<Utc>,
    },
}

/// Durable storage for the two feedback tables.
///
/// Implementations must keep the sentiment insert conditional: the recency
/// check and the write happen inside one transaction so two racing
/// submissions from the same address cannot both land within the window.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Whether an app-improvement row already exists for `ip`.
    async fn has_app_feedback(&self, ip: &str) -> Result<bool, FeedbackRepositoryError>;

    /// Timestamp of the most recent sentiment row for `ip`, if any.
    async fn latest_sentiment_at(
        &self,
        ip: &str,
    ) -> Result<Option<DateTime<Utc>>, FeedbackRepositoryError>;

    /// Insert a sentiment row unless one newer than `cutoff` exists for `ip`.
    async fn insert_sentiment(
        &self,
        content: &str,
        ip: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<SentimentInsert, FeedbackRepositoryError>;

    /// Insert an app-improvement row.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRepositoryError::DuplicateIp`] when the store's
    /// unique constraint on `ip` rejects the write.
    async fn insert_app(&self, content: &str, ip: &str) -> Result<(), FeedbackRepositoryError>;

    /// All rows of `kind`, most recent first, `id` descending as tie-break.
    async fn list(&self, kind: FeedbackKind) -> Result<Vec<FeedbackRecord>, FeedbackRepositoryError>;
}
