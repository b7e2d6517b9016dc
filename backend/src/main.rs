//! Backend entry-point: configuration, tracing, store bootstrap, HTTP server.

use mockable::DefaultEnv;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};

use backend::server::{bootstrap, AppConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env(&DefaultEnv::new())
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    bootstrap(config).await?.await
}
