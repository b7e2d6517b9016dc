//! End-to-end tests for the REST surface over in-memory test doubles.
//!
//! The app under test is assembled by the production `build_app` wiring, so
//! routing, extraction, authorization ordering and error mapping are all
//! exercised exactly as deployed; only the repository and clock are doubles.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use backend::domain::{FeedbackService, SUBMISSION_WINDOW_MS};
use backend::inbound::http::auth::SharedSecretVerifier;
use backend::inbound::http::state::HttpState;
use backend::server::build_app;
use backend::test_support::{FixedClock, InMemoryFeedbackRepository};

const SECRET: &str = "test-secret";

fn noon() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn state_over(repo: Arc<InMemoryFeedbackRepository>) -> web::Data<HttpState> {
    let service = Arc::new(FeedbackService::new(
        repo,
        Arc::new(FixedClock::new(noon())),
    ));
    web::Data::new(HttpState::new(
        service,
        Arc::new(SharedSecretVerifier::new(SECRET)),
    ))
}

#[actix_web::test]
async fn ping_reports_liveness() {
    let app = actix_test::init_service(build_app(state_over(Arc::new(
        InMemoryFeedbackRepository::new(),
    ))))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/ping").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("trace-id"));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("status").and_then(Value::as_str), Some("ok"));
}

#[actix_web::test]
async fn fresh_ip_may_submit_everything() {
    let app = actix_test::init_service(build_app(state_over(Arc::new(
        InMemoryFeedbackRepository::new(),
    ))))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/check-status")
            .insert_header(("X-Forwarded-For", "9.9.9.9"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("canSubmitApp"), Some(&json!(true)));
    assert_eq!(body.get("canSubmitSentiment"), Some(&json!(true)));
    // The key is present and explicitly null; the client reads it directly.
    assert_eq!(body.get("nextAvailable"), Some(&Value::Null));
}

#[actix_web::test]
async fn sentiment_submission_then_status_reports_the_wait() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .set_json(json!({ "content": "feeling calm", "type": "sentiment" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("success"), Some(&json!(true)));

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/check-status")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("canSubmitSentiment"), Some(&json!(false)));
    assert_eq!(
        body.get("nextAvailable").and_then(Value::as_i64),
        Some(noon().timestamp_millis() + SUBMISSION_WINDOW_MS)
    );
}

#[actix_web::test]
async fn repeated_sentiment_submission_is_rate_limited() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    for (attempt, expected) in [(1, StatusCode::OK), (2, StatusCode::FORBIDDEN)] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedback")
                .insert_header(("X-Forwarded-For", "1.2.3.4"))
                .set_json(json!({ "content": "feeling calm", "type": "sentiment" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected, "attempt {attempt}");
    }
    assert_eq!(repo.row_count(), 1);
}

#[actix_web::test]
async fn repeated_improvement_submission_is_a_duplicate() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    for (attempt, expected) in [(1, StatusCode::OK), (2, StatusCode::FORBIDDEN)] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/feedback")
                .insert_header(("X-Forwarded-For", "5.6.7.8"))
                .set_json(json!({ "content": "add dark mode", "type": "improvement" }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), expected, "attempt {attempt}");
    }
    assert_eq!(repo.row_count(), 1);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/check-status")
            .insert_header(("X-Forwarded-For", "5.6.7.8"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.get("canSubmitApp"), Some(&json!(false)));
}

#[actix_web::test]
async fn blank_content_is_a_validation_error() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .set_json(json!({ "content": "   ", "type": "sentiment" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("O feedback não pode estar vazio.")
    );
    assert_eq!(repo.row_count(), 0);
}

#[actix_web::test]
async fn missing_content_field_is_treated_as_blank_content() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .set_json(json!({ "type": "sentiment" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("O feedback não pode estar vazio.")
    );
    assert_eq!(repo.row_count(), 0);
}

#[actix_web::test]
async fn malformed_body_still_answers_with_the_error_envelope() {
    let app = actix_test::init_service(build_app(state_over(Arc::new(
        InMemoryFeedbackRepository::new(),
    ))))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/feedback")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Requisição inválida.")
    );
}

#[actix_web::test]
async fn listing_requires_the_exact_secret_before_any_store_access() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    repo.seed_sentiment("feeling calm", "1.2.3.4", noon());
    // Armed failure: any store access would answer 503 instead of 401.
    repo.fail_next("connection refused");
    let app = actix_test::init_service(build_app(state_over(repo.clone()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/feedbacks/sentiment")
            .insert_header(("Authorization", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The armed failure is still pending, proving the store was untouched;
    // the next authorized call consumes it.
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/feedbacks/sentiment")
            .insert_header(("Authorization", SECRET))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/feedbacks/sentiment")
            .insert_header(("Authorization", SECRET))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("content").and_then(Value::as_str),
        Some("feeling calm")
    );
}

#[actix_web::test]
async fn store_failures_never_leak_driver_text() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    repo.fail_next("connection refused by peer at 10.0.0.7");
    let app = actix_test::init_service(build_app(state_over(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/check-status")
            .insert_header(("X-Forwarded-For", "1.2.3.4"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = actix_test::read_body_json(response).await;
    let message = body.get("error").and_then(Value::as_str).expect("message");
    assert!(!message.contains("10.0.0.7"));
    assert!(!message.contains("connection refused"));
}

#[actix_web::test]
async fn export_streams_quoted_csv_with_attachment_headers() {
    let repo = Arc::new(InMemoryFeedbackRepository::new());
    repo.seed_sentiment("He said \"hi\"\nline2", "1.2.3.4", noon());
    let app = actix_test::init_service(build_app(state_over(repo))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/export/sentiment?pwd={SECRET}"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );
    assert_eq!(
        response
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok()),
        Some("attachment; filename=feedbacks_sentiment.csv")
    );

    let body = actix_test::read_body(response).await;
    let text = std::str::from_utf8(&body).expect("utf-8 csv");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,content,ip,created_at"));
    let row = lines.next().expect("one data row");
    assert!(row.contains("\"He said \"\"hi\"\" line2\""));
}

#[actix_web::test]
async fn export_rejects_a_wrong_query_credential() {
    let app = actix_test::init_service(build_app(state_over(Arc::new(
        InMemoryFeedbackRepository::new(),
    ))))
    .await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/export/sentiment?pwd=wrong")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
