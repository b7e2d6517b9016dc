//! Admin view: an authentication-then-list state machine.
//!
//! One instance exists per feedback kind. The entered password is not a
//! session token: it is re-sent on every privileged call, so signing out is a
//! purely local transition with nothing to invalidate server-side.

/// Admin flow over records of type `R`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminFlow<R> {
    /// Password prompt, optionally showing the last failure inline.
    Unauthenticated {
        /// Error text from the previous attempt, if any.
        error: Option<String>,
    },
    /// Credential accepted; the fetched records are on screen.
    Authenticated {
        /// Records returned by the listing call, most recent first.
        records: Vec<R>,
    },
}

impl<R> Default for AdminFlow<R> {
    fn default() -> Self {
        Self::Unauthenticated { error: None }
    }
}

impl<R> AdminFlow<R> {
    /// Start at the password prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The listing call succeeded with the entered password.
    #[must_use]
    pub fn login_succeeded(self, records: Vec<R>) -> Self {
        Self::Authenticated { records }
    }

    /// The listing call failed; stay at the prompt and surface the error.
    #[must_use]
    pub fn login_failed(self, message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            error: Some(message.into()),
        }
    }

    /// Manual sign-out back to a clean prompt.
    #[must_use]
    pub fn sign_out(self) -> Self {
        Self::Unauthenticated { error: None }
    }

    /// Whether the view is past the password prompt.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn failure_stays_at_the_prompt_with_inline_error() {
        let flow = AdminFlow::<String>::new().login_failed("Senha incorreta ou erro no servidor.");
        assert!(!flow.is_authenticated());
        assert_eq!(
            flow,
            AdminFlow::Unauthenticated {
                error: Some("Senha incorreta ou erro no servidor.".into())
            }
        );
    }

    #[rstest]
    fn success_renders_the_records() {
        let flow = AdminFlow::new().login_succeeded(vec!["note".to_owned()]);
        assert!(flow.is_authenticated());
    }

    #[rstest]
    fn sign_out_clears_state_and_errors() {
        let flow = AdminFlow::new()
            .login_succeeded(vec!["note".to_owned()])
            .sign_out();
        assert_eq!(flow, AdminFlow::Unauthenticated { error: None });

        let after_failure = AdminFlow::<String>::new()
            .login_failed("nope")
            .sign_out();
        assert_eq!(after_failure, AdminFlow::Unauthenticated { error: None });
    }
}
