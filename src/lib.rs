//! # Typoreporter (Account Signup)
//!
//! `typoreporter` registers accounts through a server-rendered HTML form.
//!
//! ## Signup
//!
//! `POST /signup` accepts a form-encoded submission (username, email, password,
//! confirmation, first and last name) protected by a double-submit CSRF token.
//!
//! - **Email Canonicalization:** Emails are trimmed and lowercased before lookup and
//!   storage. Only one account may exist per case-insensitive email address; a repeated
//!   submission is accepted as a silent no-op.
//! - **Validation Errors:** Bad emails, mismatched passwords, invalid usernames and
//!   overlong names re-render the form with a localized, HTML-escaped message.
//!   Passwords failing the length policy redirect back to the form.
//! - **Passwords:** Only an Argon2id hash is persisted. The confirmation field is never stored.
//!
//! ## Storage
//!
//! Accounts are kept behind the [`store::AccountRepository`] trait. The server uses
//! PostgreSQL; tests use the in-memory implementation.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
