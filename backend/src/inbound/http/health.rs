//! Liveness probe.
//!
//! `/api/ping` is informational only: it answers without touching the store,
//! so a healthy response says the process is up, not that feedback can be
//! persisted.

use actix_web::{get, http::header, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Response body for `GET /api/ping`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    /// Always `ok`.
    pub status: String,
    /// Human-readable liveness note.
    pub message: String,
    /// Server time in RFC 3339.
    pub timestamp: String,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/ping",
    responses((status = 200, description = "Process is up", body = PingResponse)),
    tags = ["health"],
    operation_id = "ping"
)]
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(PingResponse {
            status: "ok".to_owned(),
            message: "API is alive!".to_owned(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use rstest::rstest;

    #[rstest]
    fn ping_answers_without_state() {
        actix_rt::System::new().block_on(async {
            let app = actix_test::init_service(App::new().service(ping)).await;
            let response =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri("/ping").to_request())
                    .await;
            assert!(response.status().is_success());
            let body: PingResponse = actix_test::read_body_json(response).await;
            assert_eq!(body.status, "ok");
        });
    }
}
