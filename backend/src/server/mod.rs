//! Server construction and wiring.
//!
//! Bootstrapping is explicit: configuration is validated, the pool is built,
//! and the schema is ensured exactly once, all before the listener binds.
//! The request path never re-checks schema readiness.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
use mockable::DefaultClock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::FeedbackService;
use crate::inbound::http::auth::SharedSecretVerifier;
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::feedback::{
    check_status, export_feedbacks, list_feedbacks, submit_feedback,
};
use crate::inbound::http::health::ping;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::persistence::{ensure_schema, DbPool, DieselFeedbackRepository, PoolConfig};

/// Assemble the actix application around shared state.
///
/// Exposed so integration tests can mount the same surface over test
/// doubles.
pub fn build_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(ping)
        .service(check_status)
        .service(submit_feedback)
        .service(list_feedbacks)
        .service(export_feedbacks);

    let app = App::new().wrap(Trace).service(api);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Validate configuration, prepare the store, and start the HTTP server.
///
/// # Errors
///
/// Returns an [`std::io::Error`] when the pool cannot be built, the schema
/// cannot be ensured, or the listener fails to bind. All three are fatal at
/// startup.
pub async fn bootstrap(config: AppConfig) -> std::io::Result<Server> {
    let pool = DbPool::new(PoolConfig::new(config.database_url.clone()))
        .await
        .map_err(std::io::Error::other)?;
    ensure_schema(&pool).await.map_err(std::io::Error::other)?;

    let service = Arc::new(FeedbackService::new(
        Arc::new(DieselFeedbackRepository::new(pool)),
        Arc::new(DefaultClock),
    ));
    let verifier = Arc::new(SharedSecretVerifier::new(config.admin_secret.clone()));
    let state = web::Data::new(HttpState::new(service, verifier));

    let bind_addr = config.bind_addr;
    info!(%bind_addr, "starting feedback server");
    let server = HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
