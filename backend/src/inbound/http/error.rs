//! HTTP error payloads and mapping from domain errors.
//!
//! Keep the domain free of transport concerns by translating [`DomainError`]
//! into Actix responses here. Every failure uses the `{"error": "<message>"}`
//! envelope the client parses; the trace identifier travels in the `trace-id`
//! response header added by the [`crate::middleware::Trace`] middleware
//! rather than in the body.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{DomainError, ErrorCode};
use crate::middleware::TraceId;

/// Error envelope returned by every endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description, rendered verbatim by the client.
    #[schema(example = "O feedback não pode estar vazio.")]
    pub error: String,
}

/// Transport wrapper over [`DomainError`] implementing [`ResponseError`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(DomainError);

impl ApiError {
    /// The wrapped domain error.
    #[must_use]
    pub fn domain(&self) -> &DomainError {
        &self.0
    }

    fn to_status_code(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self(value)
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Self(DomainError::internal("Internal server error"))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.message())
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        if let Some(trace_id) = TraceId::current() {
            error!(code = ?self.0.code(), %trace_id, message = self.0.message(), "request failed");
        }
        let message = if matches!(self.0.code(), ErrorCode::InternalError) {
            // Never leak internals, mirroring the generic store message.
            "Erro interno do servidor.".to_owned()
        } else {
            self.0.message().to_owned()
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Turn a JSON payload extraction failure into the standard error envelope.
///
/// Without this, a malformed or non-JSON body would surface actix's default
/// plain-text serde message instead of the `{"error": ...}` shape every other
/// failure uses. Wired into [`actix_web::web::JsonConfig`] by the server.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    debug!(error = %err, "rejecting malformed request body");
    ApiError::from(DomainError::invalid_request("Requisição inválida.")).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(DomainError::invalid_request("empty"), StatusCode::BAD_REQUEST)]
    #[case(DomainError::unauthorized("bad secret"), StatusCode::UNAUTHORIZED)]
    #[case(DomainError::forbidden("wait"), StatusCode::FORBIDDEN)]
    #[case(
        DomainError::service_unavailable("store down"),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    fn maps_codes_onto_status_codes(#[case] domain: DomainError, #[case] expected: StatusCode) {
        let api = ApiError::from(domain);
        assert_eq!(api.status_code(), expected);
    }

    #[rstest]
    fn body_is_the_error_envelope() {
        actix_rt::System::new().block_on(async {
            let api = ApiError::from(DomainError::forbidden("Please wait 2 hours."));
            let response = api.error_response();
            let bytes = to_bytes(response.into_body()).await.expect("body");
            let value: Value = serde_json::from_slice(&bytes).expect("json");
            assert_eq!(
                value.get("error").and_then(Value::as_str),
                Some("Please wait 2 hours.")
            );
        });
    }

    #[rstest]
    fn internal_errors_are_redacted() {
        actix_rt::System::new().block_on(async {
            let api = ApiError::from(DomainError::internal("pool handle dropped"));
            let response = api.error_response();
            let bytes = to_bytes(response.into_body()).await.expect("body");
            let value: Value = serde_json::from_slice(&bytes).expect("json");
            assert_eq!(
                value.get("error").and_then(Value::as_str),
                Some("Erro interno do servidor.")
            );
        });
    }
}
