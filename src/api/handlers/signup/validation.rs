//! Signup validation rules.
//!
//! Rules run in a fixed order and the first failure wins:
//! email format, password confirmation, username, names, password policy.

use super::{
    form::SignupForm,
    messages::{Locale, MessageSource},
};
use regex::Regex;
use secrecy::SecretString;

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const USERNAME_MAX_LENGTH: usize = 20;
pub const NAME_MAX_LENGTH: usize = 50;

pub const DEFAULT_PASSWORD_MIN_LENGTH: usize = 8;
pub const DEFAULT_PASSWORD_MAX_LENGTH: usize = 64;

/// Normalize an email for lookup/uniqueness checks.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic `local@domain.tld` check.
pub(super) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}

pub(super) fn valid_username(username: &str) -> bool {
    let length = username.chars().count();
    (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length)
        && Regex::new(r"^[-_A-Za-z0-9]+$").is_ok_and(|re| re.is_match(username))
}

/// Length bounds for new passwords, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl PasswordPolicy {
    /// Build a policy; `None` when the bounds are empty or inverted.
    #[must_use]
    pub fn new(min_length: usize, max_length: usize) -> Option<Self> {
        if min_length == 0 || min_length > max_length {
            return None;
        }
        Some(Self {
            min_length,
            max_length,
        })
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    #[must_use]
    pub fn allows(&self, password: &str) -> bool {
        let length = password.chars().count();
        (self.min_length..=self.max_length).contains(&length)
            && !password.chars().all(char::is_whitespace)
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_PASSWORD_MIN_LENGTH,
            max_length: DEFAULT_PASSWORD_MAX_LENGTH,
        }
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Rejection {
    InvalidEmail { submitted: String },
    PasswordsDontMatch,
    InvalidUsername,
    FirstNameTooLong,
    LastNameTooLong,
    WeakPassword,
}

impl Rejection {
    /// Weak passwords are answered with a redirect instead of a rendered page.
    pub(super) const fn redirects(&self) -> bool {
        matches!(self, Self::WeakPassword)
    }

    /// Localized, unescaped message for this rejection.
    pub(super) fn message(
        &self,
        messages: &MessageSource,
        locale: Locale,
        policy: &PasswordPolicy,
    ) -> String {
        match self {
            Self::InvalidEmail { submitted } => {
                messages.get_message("alert.email-not-valid", &[submitted.as_str()], locale)
            }
            Self::PasswordsDontMatch => {
                messages.get_message("alert.passwords-dont-match", &[], locale)
            }
            Self::InvalidUsername => messages.get_message(
                "alert.username-not-valid",
                &[
                    USERNAME_MIN_LENGTH.to_string().as_str(),
                    USERNAME_MAX_LENGTH.to_string().as_str(),
                ],
                locale,
            ),
            Self::FirstNameTooLong => messages.get_message(
                "alert.first-name-too-long",
                &[NAME_MAX_LENGTH.to_string().as_str()],
                locale,
            ),
            Self::LastNameTooLong => messages.get_message(
                "alert.last-name-too-long",
                &[NAME_MAX_LENGTH.to_string().as_str()],
                locale,
            ),
            Self::WeakPassword => weak_password_message(messages, locale, policy),
        }
    }
}

pub(super) fn weak_password_message(
    messages: &MessageSource,
    locale: Locale,
    policy: &PasswordPolicy,
) -> String {
    messages.get_message(
        "alert.password-weak",
        &[
            policy.min_length().to_string().as_str(),
            policy.max_length().to_string().as_str(),
        ],
        locale,
    )
}

/// A submission that passed every rule; `email` is canonical.
pub(super) struct ValidSignup {
    pub(super) username: String,
    pub(super) email: String,
    pub(super) password: SecretString,
    pub(super) first_name: String,
    pub(super) last_name: String,
}

pub(super) fn validate(form: &SignupForm, policy: &PasswordPolicy) -> Result<ValidSignup, Rejection> {
    let email = normalize_email(&form.email);
    if !valid_email(&email) {
        return Err(Rejection::InvalidEmail {
            submitted: form.email.clone(),
        });
    }

    let password = form.password.as_str();
    if password.as_bytes() != form.confirm_password.as_bytes() {
        return Err(Rejection::PasswordsDontMatch);
    }

    if !valid_username(&form.username) {
        return Err(Rejection::InvalidUsername);
    }

    if form.first_name.chars().count() > NAME_MAX_LENGTH {
        return Err(Rejection::FirstNameTooLong);
    }

    if form.last_name.chars().count() > NAME_MAX_LENGTH {
        return Err(Rejection::LastNameTooLong);
    }

    if !policy.allows(password) {
        return Err(Rejection::WeakPassword);
    }

    Ok(ValidSignup {
        username: form.username.clone(),
        email,
        password: SecretString::from(form.password.clone()),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
    })
}
