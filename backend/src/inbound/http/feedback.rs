//! Feedback API handlers.
//!
//! ```text
//! GET  /api/check-status
//! POST /api/feedback {"content":"feeling calm","type":"sentiment"}
//! GET  /api/feedbacks/{kind}   (Authorization: <secret>)
//! GET  /api/export/{kind}?pwd=<secret>
//! ```

use actix_web::http::header;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FeedbackKind, FeedbackRecord};

use super::auth::authorize;
use super::client_ip::client_ip;
use super::state::HttpState;
use super::ApiResult;

/// Eligibility payload for `GET /api/check-status`.
///
/// `nextAvailable` is epoch milliseconds and stays `null` while sentiment
/// submission is open; the client relies on the key always being present.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Whether an app suggestion may still be submitted.
    pub can_submit_app: bool,
    /// Whether a sentiment note may be submitted right now.
    pub can_submit_sentiment: bool,
    /// Epoch-millisecond reopening instant, `null` when unblocked.
    pub next_available: Option<i64>,
}

/// Request body for `POST /api/feedback`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRequest {
    /// Feedback text; must be non-empty after trimming. A missing field
    /// deserialises as empty so it fails validation like blank content does,
    /// keeping the error envelope instead of a serde extraction message.
    #[serde(default)]
    pub content: String,
    /// Kind discriminator; anything but `sentiment` targets the app table.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Success body for `POST /api/feedback`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    /// Always `true`; failures use the error envelope instead.
    pub success: bool,
}

/// Report submission eligibility for the calling address.
#[utoipa::path(
    get,
    path = "/api/check-status",
    responses(
        (status = 200, description = "Eligibility snapshot", body = StatusResponse),
        (status = 503, description = "Store unavailable", body = super::error::ErrorBody)
    ),
    tags = ["feedback"],
    operation_id = "checkStatus"
)]
#[get("/check-status")]
pub async fn check_status(
    req: HttpRequest,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<StatusResponse>> {
    let ip = client_ip(&req);
    let status = state.feedback.check_status(&ip).await?;
    Ok(web::Json(StatusResponse {
        can_submit_app: status.can_submit_app,
        can_submit_sentiment: status.can_submit_sentiment,
        next_available: status.next_available,
    }))
}

/// Accept one feedback submission from the calling address.
#[utoipa::path(
    post,
    path = "/api/feedback",
    request_body = SubmitRequest,
    responses(
        (status = 200, description = "Stored", body = SubmitResponse),
        (status = 400, description = "Empty content", body = super::error::ErrorBody),
        (status = 403, description = "Rate limited or duplicate", body = super::error::ErrorBody),
        (status = 503, description = "Store unavailable", body = super::error::ErrorBody)
    ),
    tags = ["feedback"],
    operation_id = "submitFeedback"
)]
#[post("/feedback")]
pub async fn submit_feedback(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<SubmitRequest>,
) -> ApiResult<web::Json<SubmitResponse>> {
    let ip = client_ip(&req);
    let kind = FeedbackKind::parse(&payload.kind);
    state.feedback.submit(&payload.content, kind, &ip).await?;
    Ok(web::Json(SubmitResponse { success: true }))
}

/// List all feedback of one kind for the admin view.
#[utoipa::path(
    get,
    path = "/api/feedbacks/{kind}",
    params(("kind" = String, Path, description = "`sentiment` or any app alias")),
    responses(
        (status = 200, description = "Records, most recent first", body = [FeedbackRecord]),
        (status = 401, description = "Bad credential", body = super::error::ErrorBody),
        (status = 503, description = "Store unavailable", body = super::error::ErrorBody)
    ),
    tags = ["admin"],
    operation_id = "listFeedbacks"
)]
#[get("/feedbacks/{kind}")]
pub async fn list_feedbacks(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<FeedbackRecord>>> {
    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    authorize(state.verifier.as_ref(), presented)?;

    let kind = FeedbackKind::parse(&path);
    let records = state.feedback.list_feedbacks(kind).await?;
    Ok(web::Json(records))
}

/// Query string for the CSV export.
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Admin secret; the export link is opened directly by the browser, so
    /// the credential rides in the query string rather than a header.
    pub pwd: Option<String>,
}

/// Download all feedback of one kind as a CSV attachment.
///
/// The download filename uses the canonical kind slug, so any non-sentiment
/// path segment exports as `feedbacks_app.csv` rather than echoing raw client
/// input into a `Content-Disposition` header.
#[utoipa::path(
    get,
    path = "/api/export/{kind}",
    params(
        ("kind" = String, Path, description = "`sentiment` or any app alias"),
        ("pwd" = String, Query, description = "Admin secret")
    ),
    responses(
        (status = 200, description = "CSV download", content_type = "text/csv"),
        (status = 401, description = "Bad credential", body = super::error::ErrorBody),
        (status = 503, description = "Store unavailable", body = super::error::ErrorBody)
    ),
    tags = ["admin"],
    operation_id = "exportFeedbacks"
)]
#[get("/export/{kind}")]
pub async fn export_feedbacks(
    path: web::Path<String>,
    query: web::Query<ExportQuery>,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    authorize(state.verifier.as_ref(), query.pwd.as_deref())?;

    let kind = FeedbackKind::parse(&path);
    let csv = state.feedback.export_csv(kind).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=feedbacks_{kind}.csv"),
        ))
        .body(csv))
}
