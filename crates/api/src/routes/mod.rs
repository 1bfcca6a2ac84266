pub mod auth;
pub mod cities;
pub mod health;
pub mod upload;
pub mod videos;

use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use cityfolio_core::document::Flatten;
use cityfolio_core::i18n::LangCode;
use serde::Serialize;

use crate::middleware::language::ViewParams;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(cities::routes())
        .merge(videos::routes())
        .merge(upload::routes(state.config().upload_max_bytes))
        .merge(auth::routes());

    Router::new()
        .merge(health::routes())
        .nest("/api", api)
        .with_state(state)
}

/// One document as either its stored bilingual shape or its flat projection.
fn render_one<T>(doc: &T, view: &ViewParams, lang: &LangCode) -> Response
where
    T: Flatten + Serialize,
{
    if view.is_full() {
        Json(doc).into_response()
    } else {
        Json(doc.flatten(lang)).into_response()
    }
}

fn render_all<T>(docs: &[T], view: &ViewParams, lang: &LangCode) -> Response
where
    T: Flatten + Serialize,
{
    if view.is_full() {
        Json(docs).into_response()
    } else {
        let flat: Vec<T::Output> = docs.iter().map(|doc| doc.flatten(lang)).collect();
        Json(flat).into_response()
    }
}
