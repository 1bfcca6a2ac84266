//! Minimal `Accept-Language` negotiation.

use super::text::LangCode;

/// Derive a language code from an `Accept-Language` header value.
///
/// Takes everything before the first comma and keeps its first two
/// characters. Quality values are not parsed and the result is not checked
/// against the supported locales; an unsupported code is left for the
/// resolver's Arabic fallback. An absent or empty header yields `ar`.
pub fn negotiate(header: Option<&str>) -> LangCode {
    let code: String = header
        .and_then(|value| value.split(',').next())
        .map(|first| first.chars().take(2).collect())
        .unwrap_or_default();

    if code.is_empty() {
        LangCode::default()
    } else {
        LangCode::new(code)
    }
}
