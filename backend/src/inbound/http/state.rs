//! Shared application state handed to the HTTP handlers.

use std::sync::Arc;

use crate::domain::FeedbackService;

use super::auth::CredentialVerifier;

/// State shared by every HTTP handler.
#[derive(Clone)]
pub struct HttpState {
    /// The feedback domain service.
    pub feedback: Arc<FeedbackService>,
    /// Admin credential verifier, consulted before any privileged call.
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl HttpState {
    /// Bundle the service and verifier for handler injection.
    #[must_use]
    pub fn new(feedback: Arc<FeedbackService>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { feedback, verifier }
    }
}
