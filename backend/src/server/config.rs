//! Environment-driven application configuration.
//!
//! Centralises the startup settings so they are validated consistently and
//! can be tested in isolation. A missing store connection string is a fatal
//! configuration error: every endpoint that matters touches the store.

use std::net::SocketAddr;

use mockable::Env;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const ADMIN_SECRET_ENV: &str = "FEEDBACK_PASSWORD";
const BIND_ADDR_ENV: &str = "BIND_ADDR";
const BIND_ADDR_DEFAULT: &str = "0.0.0.0:3001";

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Shared secret gating the admin list/export endpoints.
    pub admin_secret: String,
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

/// Errors raised while validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Name of the absent variable.
        name: &'static str,
    },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Name of the offending variable.
        name: &'static str,
        /// The rejected value.
        value: String,
        /// What a valid value looks like.
        expected: &'static str,
    },
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` or `FEEDBACK_PASSWORD` is
    /// absent, or when `BIND_ADDR` does not parse as a socket address.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let database_url = require(env, DATABASE_URL_ENV)?;
        let admin_secret = require(env, ADMIN_SECRET_ENV)?;

        let bind_raw = env
            .string(BIND_ADDR_ENV)
            .unwrap_or_else(|| BIND_ADDR_DEFAULT.to_owned());
        let bind_addr = bind_raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: bind_raw,
                expected: "host:port socket address",
            })?;

        Ok(Self {
            database_url,
            admin_secret,
            bind_addr,
        })
    }
}

fn require<E: Env>(env: &E, name: &'static str) -> Result<String, ConfigError> {
    env.string(name)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingEnv { name })
}
