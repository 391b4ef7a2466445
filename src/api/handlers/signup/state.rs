//! Signup configuration and shared handler state.

use super::{messages::MessageSource, validation::PasswordPolicy};
use crate::store::AccountRepository;
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct SignupConfig {
    password_policy: PasswordPolicy,
    secure_cookies: bool,
}

impl SignupConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = policy;
        self
    }

    /// Mark the CSRF cookie `Secure`; enable when served over HTTPS.
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn password_policy(&self) -> &PasswordPolicy {
        &self.password_policy
    }

    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies
    }
}

/// Everything the signup handlers need, injected as an `Extension`.
pub struct SignupState {
    config: SignupConfig,
    accounts: Arc<dyn AccountRepository>,
    messages: MessageSource,
}

impl SignupState {
    #[must_use]
    pub fn new(
        config: SignupConfig,
        accounts: Arc<dyn AccountRepository>,
        messages: MessageSource,
    ) -> Self {
        Self {
            config,
            accounts,
            messages,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    #[must_use]
    pub fn accounts(&self) -> &dyn AccountRepository {
        self.accounts.as_ref()
    }

    #[must_use]
    pub fn messages(&self) -> &MessageSource {
        &self.messages
    }
}

impl std::fmt::Debug for SignupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
