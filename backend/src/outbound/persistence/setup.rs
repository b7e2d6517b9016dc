//! Idempotent schema creation, run once at process startup.
//!
//! The ensure step is an explicit part of bootstrap rather than a lazy
//! per-request check, so the request path never pays for a no-op round trip.
//! `IF NOT EXISTS` keeps the statements re-entrant across process restarts.

use diesel_async::RunQueryDsl;
use tracing::info;

use super::pool::{DbPool, PoolError};

const CREATE_SENTIMENT_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS sentiment_feedbacks (
    id SERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    ip TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_APP_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS app_feedbacks (
    id SERIAL PRIMARY KEY,
    content TEXT NOT NULL,
    ip TEXT NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

/// Errors raised while ensuring the schema exists.
#[derive(Debug, thiserror::Error)]
pub enum SchemaSetupError {
    /// The pool could not hand out a connection.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// A create statement failed.
    #[error("schema creation failed: {0}")]
    Statement(#[from] diesel::result::Error),
}

/// Create both feedback tables when absent.
///
/// # Errors
///
/// Returns [`SchemaSetupError`] when a connection cannot be obtained or a
/// statement fails; the caller treats this as fatal at startup.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaSetupError> {
    let mut conn = pool.get().await?;
    diesel::sql_query(CREATE_SENTIMENT_TABLE)
        .execute(&mut conn)
        .await?;
    diesel::sql_query(CREATE_APP_TABLE)
        .execute(&mut conn)
        .await?;
    info!("feedback schema ensured");
    Ok(())
}
