//! Domain layer: feedback types, eligibility rules, and ports.

pub mod csv;
pub mod error;
pub mod feedback;
pub mod ports;
pub mod service;

pub use error::{DomainError, ErrorCode};
pub use feedback::{FeedbackKind, FeedbackRecord, SubmissionStatus, SUBMISSION_WINDOW_MS};
pub use service::FeedbackService;
