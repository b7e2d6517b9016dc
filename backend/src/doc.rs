//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API. Swagger UI serves it in debug builds only.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the admin shared-secret scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "AdminSecret",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Shared admin secret, re-sent on every privileged call.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Serenar feedback API",
        description = "Eligibility checks, feedback submission, and the admin listing/export surface."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::feedback::check_status,
        crate::inbound::http::feedback::submit_feedback,
        crate::inbound::http::feedback::list_feedbacks,
        crate::inbound::http::feedback::export_feedbacks,
        crate::inbound::http::health::ping,
    ),
    components(schemas(
        crate::inbound::http::feedback::StatusResponse,
        crate::inbound::http::feedback::SubmitRequest,
        crate::inbound::http::feedback::SubmitResponse,
        crate::inbound::http::health::PingResponse,
        crate::inbound::http::error::ErrorBody,
        crate::domain::FeedbackRecord,
    )),
    tags(
        (name = "feedback", description = "Public submission endpoints"),
        (name = "admin", description = "Secret-gated listing and export"),
        (name = "health", description = "Liveness probe"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn document_contains_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/api/check-status",
            "/api/feedback",
            "/api/feedbacks/{kind}",
            "/api/export/{kind}",
            "/api/ping",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }
}
