//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod client_ip;
pub mod error;
pub mod feedback;
pub mod health;
pub mod state;

pub use error::{ApiError, ApiResult};
