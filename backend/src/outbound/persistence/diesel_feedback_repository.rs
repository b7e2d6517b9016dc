//! PostgreSQL-backed `FeedbackRepository` implementation using Diesel ORM.
//!
//! The sentiment insert runs its recency check and the write inside one
//! transaction, so the rolling-window rule holds even when a stale status
//! check races the submission. The app insert leans on the table's unique
//! constraint and maps the violation to `DuplicateIp`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::feedback::{FeedbackKind, FeedbackRecord};
use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError, SentimentInsert};

use super::models::{
    AppFeedbackRow, NewAppFeedbackRow, NewSentimentFeedbackRow, SentimentFeedbackRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{app_feedbacks, sentiment_feedbacks};

/// Diesel-backed implementation of the `FeedbackRepository` port.
#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> FeedbackRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FeedbackRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            FeedbackRepositoryError::DuplicateIp
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            FeedbackRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => FeedbackRepositoryError::query("database error"),
        _ => FeedbackRepositoryError::query("database error"),
    }
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn has_app_feedback(&self, ip: &str) -> Result<bool, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let found: Option<i32> = app_feedbacks::table
            .filter(app_feedbacks::ip.eq(ip))
            .select(app_feedbacks::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(found.is_some())
    }

    async fn latest_sentiment_at(
        &self,
        ip: &str,
    ) -> Result<Option<DateTime<Utc>>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sentiment_feedbacks::table
            .filter(sentiment_feedbacks::ip.eq(ip))
            .order(sentiment_feedbacks::created_at.desc())
            .select(sentiment_feedbacks::created_at)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn insert_sentiment(
        &self,
        content: &str,
        ip: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<SentimentInsert, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<SentimentInsert, diesel::result::Error, _>(|conn| {
            async move {
                let last: Option<DateTime<Utc>> = sentiment_feedbacks::table
                    .filter(sentiment_feedbacks::ip.eq(ip))
                    .order(sentiment_feedbacks::created_at.desc())
                    .select(sentiment_feedbacks::created_at)
                    .first(conn)
                    .await
                    .optional()?;

                if let Some(last_submitted_at) = last.filter(|at| *at > cutoff) {
                    return Ok(SentimentInsert::RateLimited { last_submitted_at });
                }

                diesel::insert_into(sentiment_feedbacks::table)
                    .values(NewSentimentFeedbackRow { content, ip })
                    .execute(conn)
                    .await?;
                Ok(SentimentInsert::Inserted)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn insert_app(&self, content: &str, ip: &str) -> Result<(), FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(app_feedbacks::table)
            .values(NewAppFeedbackRow { content, ip })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(
        &self,
        kind: FeedbackKind,
    ) -> Result<Vec<FeedbackRecord>, FeedbackRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Timestamps can collide at the store's precision, so `id` breaks
        // ties in insertion order.
        let records = match kind {
            FeedbackKind::Sentiment => sentiment_feedbacks::table
                .order((
                    sentiment_feedbacks::created_at.desc(),
                    sentiment_feedbacks::id.desc(),
                ))
                .select(SentimentFeedbackRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .map(FeedbackRecord::from)
                .collect(),
            FeedbackKind::App => app_feedbacks::table
                .order((app_feedbacks::created_at.desc(), app_feedbacks::id.desc()))
                .select(AppFeedbackRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .map(FeedbackRecord::from)
                .collect(),
        };
        Ok(records)
    }
}
