//! Double-submit CSRF tokens.
//!
//! `GET /signup` issues a random token in the `XSRF-TOKEN` cookie and embeds
//! the same value in the form's `_csrf` field; `POST /signup` requires both to match.

use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};

pub const CSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
pub const CSRF_FORM_FIELD: &str = "_csrf";
pub const CSRF_COOKIE_MAX_AGE: u64 = 3600;

/// Create a new URL-safe token from 32 random bytes.
pub(super) fn generate_csrf_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate csrf token")?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// `Set-Cookie` value for the token. `HttpOnly` because the token is read from the form, not JS.
pub(super) fn csrf_cookie(token: &str, secure: bool) -> Result<HeaderValue> {
    let secure_flag = if secure { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{CSRF_COOKIE_NAME}={token}; HttpOnly{secure_flag}; SameSite=Strict; Path=/; Max-Age={CSRF_COOKIE_MAX_AGE}"
    ))
    .context("invalid csrf cookie value")
}

/// Extract the CSRF token from the request `Cookie` headers.
pub(super) fn extract_csrf_cookie(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{CSRF_COOKIE_NAME}=");
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|part| part.trim().strip_prefix(prefix.as_str()))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Constant-time comparison of the cookie and form tokens.
pub(super) fn tokens_match(cookie_token: &str, form_token: &str) -> bool {
    if cookie_token.is_empty() || cookie_token.len() != form_token.len() {
        return false;
    }

    let mut diff = 0u8;
    for (a, b) in cookie_token.bytes().zip(form_token.bytes()) {
        diff |= a ^ b;
    }
    diff == 0
}
