//! Account signup: form rendering, validation and account creation.
//!
//! Flow:
//! - `GET /signup` issues a CSRF token (cookie + hidden field) and renders the form.
//! - `POST /signup` checks the token, validates the submission, canonicalizes the
//!   email and saves the account unless the email is already registered.
//! - Validation failures re-render the form with a localized message, except weak
//!   passwords which redirect back to `GET /signup?error=weak-password`.
//! - A repeated email (any letter case) is accepted without creating anything.

pub mod csrf;
pub mod form;
pub mod messages;
mod password;
pub mod state;
mod templates;
pub mod validation;


pub use form::{SignupForm, home, signup, signup_form};
pub use messages::{Locale, MessageSource};
pub use state::{SignupConfig, SignupState};
pub use validation::PasswordPolicy;
