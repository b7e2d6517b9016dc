//! Admin credential verification.
//!
//! The admin surface is gated by a single shared secret compared with exact
//! string equality, re-sent on every privileged call. The comparison lives
//! behind [`CredentialVerifier`] so a stronger scheme (hashed secret, token
//! expiry) could replace it without touching the handlers. Verification runs
//! before any store access.

use crate::domain::DomainError;

use super::ApiResult;

/// Decides whether a presented admin credential is valid.
pub trait CredentialVerifier: Send + Sync {
    /// Exact-match check of the presented credential.
    fn verify(&self, presented: &str) -> bool;
}

/// Production verifier holding the configured shared secret.
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    /// Create a verifier over the configured secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, presented: &str) -> bool {
        presented == self.secret
    }
}

/// Reject the request unless `presented` matches the admin secret.
///
/// # Errors
///
/// Returns an unauthorized [`ApiResult`] error for a missing or wrong
/// credential.
pub fn authorize(verifier: &dyn CredentialVerifier, presented: Option<&str>) -> ApiResult<()> {
    match presented {
        Some(value) if verifier.verify(value) => Ok(()),
        _ => Err(DomainError::unauthorized("Não autorizado.").into()),
    }
}
