//! Feedback domain service.
//!
//! Stateless per call: validation, the eligibility rules, and the mapping of
//! adapter failures into caller-safe [`DomainError`]s all live here. Store
//! failures are logged with their adapter detail but surface as one generic
//! message so driver internals never leak to clients.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use super::csv;
use super::error::DomainError;
use super::feedback::{FeedbackKind, FeedbackRecord, SubmissionStatus, SUBMISSION_WINDOW_MS};
use super::ports::{FeedbackRepository, FeedbackRepositoryError, SentimentInsert};

/// Generic message for any persistence failure. Deliberately detail-free;
/// the adapter description goes to the logs only.
const STORE_TROUBLE: &str = "Erro no banco de dados. Tente novamente mais tarde.";

/// Message for a sentiment submission inside the rolling window.
const RATE_LIMITED: &str = "Por favor, aguarde 2 horas para enviar novamente.";

/// Message for a repeated app-improvement submission.
const ALREADY_SUGGESTED: &str = "Você já enviou uma sugestão para o app.";

/// Message for empty feedback content.
const EMPTY_CONTENT: &str = "O feedback não pode estar vazio.";

/// Domain service implementing status checks, submission, listing and export.
#[derive(Clone)]
pub struct FeedbackService {
    repo: Arc<dyn FeedbackRepository>,
    clock: Arc<dyn Clock>,
}

impl FeedbackService {
    /// Create a new service over the given repository and clock.
    pub fn new(repo: Arc<dyn FeedbackRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Report whether `ip` may currently submit each feedback kind.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceUnavailable` error when the store cannot be read.
    pub async fn check_status(&self, ip: &str) -> Result<SubmissionStatus, DomainError> {
        let can_submit_app = !self
            .repo
            .has_app_feedback(ip)
            .await
            .map_err(map_store_error)?;

        let last = self
            .repo
            .latest_sentiment_at(ip)
            .await
            .map_err(map_store_error)?;

        let now = self.clock.utc();
        let status = match last {
            Some(at) if now.signed_duration_since(at) < submission_window() => SubmissionStatus {
                can_submit_app,
                can_submit_sentiment: false,
                next_available: Some(SubmissionStatus::next_available_after(at)),
            },
            _ => SubmissionStatus {
                can_submit_app,
                can_submit_sentiment: true,
                next_available: None,
            },
        };
        Ok(status)
    }

    /// Persist one feedback row for `ip`.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when `content` is empty after trimming.
    /// - `Forbidden` (`rate_limited`) when a sentiment row for `ip` exists
    ///   inside the rolling window; the check runs at insert time, inside the
    ///   store transaction, so a stale status check cannot slip a row in.
    /// - `Forbidden` (`duplicate_submission`) when an app row for `ip`
    ///   already exists.
    /// - `ServiceUnavailable` for any other store failure.
    pub async fn submit(
        &self,
        content: &str,
        kind: FeedbackKind,
        ip: &str,
    ) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::invalid_request(EMPTY_CONTENT)
                .with_details(json!({ "field": "content", "code": "empty_content" })));
        }

        match kind {
            FeedbackKind::Sentiment => {
                let cutoff = self.clock.utc() - submission_window();
                let outcome = self
                    .repo
                    .insert_sentiment(content, ip, cutoff)
                    .await
                    .map_err(map_store_error)?;
                match outcome {
                    SentimentInsert::Inserted => {}
                    SentimentInsert::RateLimited { last_submitted_at } => {
                        return Err(DomainError::forbidden(RATE_LIMITED).with_details(json!({
                            "code": "rate_limited",
                            "nextAvailable":
                                SubmissionStatus::next_available_after(last_submitted_at),
                        })));
                    }
                }
            }
            FeedbackKind::App => match self.repo.insert_app(content, ip).await {
                Ok(()) => {}
                Err(FeedbackRepositoryError::DuplicateIp) => {
                    return Err(DomainError::forbidden(ALREADY_SUGGESTED)
                        .with_details(json!({ "code": "duplicate_submission" })));
                }
                Err(err) => return Err(map_store_error(err)),
            },
        }

        info!(%kind, "feedback stored");
        Ok(())
    }

    /// All rows of `kind`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceUnavailable` error when the store cannot be read.
    pub async fn list_feedbacks(
        &self,
        kind: FeedbackKind,
    ) -> Result<Vec<FeedbackRecord>, DomainError> {
        self.repo.list(kind).await.map_err(map_store_error)
    }

    /// CSV export of all rows of `kind`, ordered as the listing.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceUnavailable` error when the store cannot be read.
    pub async fn export_csv(&self, kind: FeedbackKind) -> Result<String, DomainError> {
        let records = self.list_feedbacks(kind).await?;
        Ok(csv::render(&records))
    }
}

fn submission_window() -> Duration {
    Duration::milliseconds(SUBMISSION_WINDOW_MS)
}

/// Collapse adapter failures into the generic store-trouble error.
///
/// `DuplicateIp` is handled by the app submission path before this runs;
/// seeing it here means a code path forgot to, which is an internal bug
/// rather than a store outage.
fn map_store_error(err: FeedbackRepositoryError) -> DomainError {
    match err {
        FeedbackRepositoryError::Connection { message }
        | FeedbackRepositoryError::Query { message } => {
            error!(detail = %message, "feedback store failure");
            DomainError::service_unavailable(STORE_TROUBLE)
        }
        FeedbackRepositoryError::DuplicateIp => {
            error!("unexpected duplicate-ip error outside the app submission path");
            DomainError::internal("unexpected uniqueness violation")
        }
    }
}
