//! Localized message bundles for the signup pages.
//!
//! Bundles are flat JSON maps embedded at build time. Messages use positional
//! `{0}`, `{1}`, ... placeholders. Lookups fall back to English, then to the
//! key itself.

use anyhow::{Context, Result};
use axum::http::{HeaderMap, header::ACCEPT_LANGUAGE};
use std::collections::HashMap;
use tracing::warn;

const EN_BUNDLE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/en.json"));
const RU_BUNDLE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/ru.json"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl Locale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim();
        if primary.eq_ignore_ascii_case("en") {
            Some(Self::En)
        } else if primary.eq_ignore_ascii_case("ru") {
            Some(Self::Ru)
        } else {
            None
        }
    }

    /// Pick the first supported language from `Accept-Language`, in header order.
    /// Quality values are ignored; entries with `q=0` are skipped.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| {
                value.split(',').find_map(|entry| {
                    let mut parts = entry.split(';');
                    let tag = parts.next()?.trim();
                    let refused = parts.any(|param| {
                        param
                            .trim()
                            .strip_prefix("q=")
                            .and_then(|q| q.trim().parse::<f32>().ok())
                            .is_some_and(|q| q <= 0.0)
                    });
                    if refused { None } else { Self::from_tag(tag) }
                })
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct MessageSource {
    bundles: HashMap<Locale, HashMap<String, String>>,
}

impl MessageSource {
    /// Load the bundles shipped with the binary.
    ///
    /// # Errors
    /// Returns an error if a bundle is not a JSON object of strings.
    pub fn builtin() -> Result<Self> {
        let mut bundles = HashMap::new();
        bundles.insert(Locale::En, parse_bundle(EN_BUNDLE).context("invalid en bundle")?);
        bundles.insert(Locale::Ru, parse_bundle(RU_BUNDLE).context("invalid ru bundle")?);
        Ok(Self { bundles })
    }

    /// Resolve `key` for `locale` and substitute `{n}` placeholders with `args[n]`.
    #[must_use]
    pub fn get_message(&self, key: &str, args: &[&str], locale: Locale) -> String {
        let template = self
            .lookup(key, locale)
            .or_else(|| self.lookup(key, Locale::En));

        let Some(template) = template else {
            warn!(key, locale = locale.as_str(), "missing message");
            return key.to_string();
        };

        args.iter()
            .enumerate()
            .fold(template.to_string(), |message, (index, arg)| {
                message.replace(&format!("{{{index}}}"), arg)
            })
    }

    fn lookup(&self, key: &str, locale: Locale) -> Option<&str> {
        self.bundles
            .get(&locale)
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }
}

fn parse_bundle(raw: &str) -> Result<HashMap<String, String>> {
    serde_json::from_str(raw).context("failed to parse message bundle")
}
