//! Test doubles shared by unit and integration tests.
//!
//! The in-memory repository honours the same ordering and uniqueness rules as
//! the PostgreSQL adapter so service- and HTTP-level tests can run without a
//! database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::feedback::{FeedbackKind, FeedbackRecord};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError, SentimentInsert};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock that always reports `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
    }
}

#[derive(Default)]
struct Tables {
    sentiment: Vec<FeedbackRecord>,
    app: Vec<FeedbackRecord>,
    next_id: i32,
    fail_with: Option<String>,
}

/// In-memory [`FeedbackRepository`] mirroring the PostgreSQL adapter's rules.
#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    tables: Mutex<Tables>,
}

impl InMemoryFeedbackRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next repository call fail with a connection error.
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_with = Some(message.to_owned());
    }

    /// Total rows across both tables.
    #[must_use]
    pub fn row_count(&self) -> usize {
        let tables = self.lock();
        tables.sentiment.len() + tables.app.len()
    }

    /// Insert a sentiment row directly, bypassing the window check.
    pub fn seed_sentiment(&self, content: &str, ip: &str, created_at: DateTime<Utc>) {
        let mut tables = self.lock();
        let id = tables.next_id();
        tables.sentiment.push(FeedbackRecord {
            id,
            content: content.to_owned(),
            ip: ip.to_owned(),
            created_at,
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        match self.tables.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn take_failure(tables: &mut Tables) -> Result<(), FeedbackRepositoryError> {
        match tables.fail_with.take() {
            Some(message) => Err(FeedbackRepositoryError::connection(message)),
            None => Ok(()),
        }
    }
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn has_app_feedback(&self, ip: &str) -> Result<bool, FeedbackRepositoryError> {
        let mut tables = self.lock();
        Self::take_failure(&mut tables)?;
        Ok(tables.app.iter().any(|row| row.ip == ip))
    }

    async fn latest_sentiment_at(
        &self,
        ip: &str,
    ) -> Result<Option<DateTime<Utc>>, FeedbackRepositoryError> {
        let mut tables = self.lock();
        Self::take_failure(&mut tables)?;
        Ok(tables
            .sentiment
            .iter()
            .filter(|row| row.ip == ip)
            .map(|row| row.created_at)
            .max())
    }

    async fn insert_sentiment(
        &self,
        content: &str,
        ip: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<SentimentInsert, FeedbackRepositoryError> {
        let mut tables = self.lock();
        Self::take_failure(&mut tables)?;
        // Same rule as the transactional adapter: a row strictly newer than
        // the cutoff blocks the insert.
        let blocking = tables
            .sentiment
            .iter()
            .filter(|row| row.ip == ip)
            .map(|row| row.created_at)
            .max()
            .filter(|at| *at > cutoff);
        if let Some(last_submitted_at) = blocking {
            return Ok(SentimentInsert::RateLimited { last_submitted_at });
        }
        let id = tables.next_id();
        // The cutoff is now minus the window, so now is cutoff plus window.
        let created_at = cutoff + chrono::Duration::milliseconds(crate::domain::SUBMISSION_WINDOW_MS);
        tables.sentiment.push(FeedbackRecord {
            id,
            content: content.to_owned(),
            ip: ip.to_owned(),
            created_at,
        });
        Ok(SentimentInsert::Inserted)
    }

    async fn insert_app(&self, content: &str, ip: &str) -> Result<(), FeedbackRepositoryError> {
        let mut tables = self.lock();
        Self::take_failure(&mut tables)?;
        if tables.app.iter().any(|row| row.ip == ip) {
            return Err(FeedbackRepositoryError::DuplicateIp);
        }
        let id = tables.next_id();
        let created_at = Utc::now();
        tables.app.push(FeedbackRecord {
            id,
            content: content.to_owned(),
            ip: ip.to_owned(),
            created_at,
        });
        Ok(())
    }

    async fn list(
        &self,
        kind: FeedbackKind,
    ) -> Result<Vec<FeedbackRecord>, FeedbackRepositoryError> {
        let mut tables = self.lock();
        Self::take_failure(&mut tables)?;
        let mut rows = match kind {
            FeedbackKind::Sentiment => tables.sentiment.clone(),
            FeedbackKind::App => tables.app.clone(),
        };
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}
