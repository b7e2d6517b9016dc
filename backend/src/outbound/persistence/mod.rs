//! PostgreSQL persistence adapter for the feedback tables.

mod diesel_feedback_repository;
mod models;
mod pool;
mod schema;
mod setup;

pub use diesel_feedback_repository::DieselFeedbackRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use setup::{ensure_schema, SchemaSetupError};
