//! Diesel row types for the two feedback tables.
//!
//! Both tables share one column layout, so a single queryable/insertable pair
//! is declared per table and converted into the domain's `FeedbackRecord`.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::FeedbackRecord;

use super::schema::{app_feedbacks, sentiment_feedbacks};

/// Queryable row for `sentiment_feedbacks`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sentiment_feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SentimentFeedbackRow {
    pub id: i32,
    pub content: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
}

/// Queryable row for `app_feedbacks`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = app_feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppFeedbackRow {
    pub id: i32,
    pub content: String,
    pub ip: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable row for `sentiment_feedbacks`; `id` and `created_at` are
/// assigned by the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = sentiment_feedbacks)]
pub(crate) struct NewSentimentFeedbackRow<'a> {
    pub content: &'a str,
    pub ip: &'a str,
}

/// Insertable row for `app_feedbacks`.
#[derive(Debug, Insertable)]
#[diesel(table_name = app_feedbacks)]
pub(crate) struct NewAppFeedbackRow<'a> {
    pub content: &'a str,
    pub ip: &'a str,
}

impl From<SentimentFeedbackRow> for FeedbackRecord {
    fn from(row: SentimentFeedbackRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            ip: row.ip,
            created_at: row.created_at,
        }
    }
}

impl From<AppFeedbackRow> for FeedbackRecord {
    fn from(row: AppFeedbackRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            ip: row.ip,
            created_at: row.created_at,
        }
    }
}
