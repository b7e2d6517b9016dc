//! Serenar feedback backend.
//!
//! A small feedback-collection service behind the 5-4-3-2-1 grounding
//! exercise client: sentiment notes rate-limited to one per address per two
//! hours, app-improvement suggestions unique per address, and a shared-secret
//! admin surface with JSON listing and CSV export.
//!
//! The crate is laid out hexagonally: `domain` holds the rules and ports,
//! `inbound::http` the actix-web adapter, `outbound::persistence` the
//! Diesel/PostgreSQL adapter, and `server` the wiring.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use middleware::{Trace, TraceId};
