use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::request::Parts;
use cityfolio_core::i18n::{negotiate, LangCode};
use serde::Deserialize;

/// Language negotiated from `Accept-Language`. Never rejects: a missing or
/// unreadable header yields the fallback code.
#[derive(Debug, Clone)]
pub struct ContentLanguage(pub LangCode);

impl<S: Send + Sync> FromRequestParts<S> for ContentLanguage {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        Ok(ContentLanguage(negotiate(header)))
    }
}

/// `?full=true` selects the stored bilingual shape instead of the flat view.
#[derive(Debug, Default, Deserialize)]
pub struct ViewParams {
    full: Option<String>,
}

impl ViewParams {
    /// Only the exact string `true` counts.
    pub fn is_full(&self) -> bool {
        self.full.as_deref() == Some("true")
    }
}
