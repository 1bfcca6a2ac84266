use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cityfolio_core::document::{parse_document_id, City, CityPatch, NewCity};
use serde_json::{json, Value};

use super::{render_all, render_one};
use crate::error::{ApiError, ApiResult};
use crate::middleware::language::{ContentLanguage, ViewParams};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

const CITY_NOT_FOUND: &str = "City not found";

/// The single-segment route is a slug for reads and an id for writes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route(
            "/cities/{key}",
            get(get_city).put(update_city).delete(delete_city),
        )
}

async fn list_cities(
    State(state): State<AppState>,
    ContentLanguage(lang): ContentLanguage,
    Query(view): Query<ViewParams>,
) -> ApiResult<Response> {
    let cities = state.store().list_cities().await?;
    Ok(render_all(&cities, &view, &lang))
}

async fn get_city(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ContentLanguage(lang): ContentLanguage,
    Query(view): Query<ViewParams>,
) -> ApiResult<Response> {
    let city = state
        .store()
        .find_city_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(CITY_NOT_FOUND.into()))?;
    Ok(render_one(&city, &view, &lang))
}

async fn create_city(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<City>)> {
    let new_city: NewCity = serde_json::from_value(payload)
        .map_err(|e| ApiError::Validation(format!("City validation failed: {e}")))?;

    let city = state.store().insert_city(new_city).await?;

    tracing::info!(city_id = %city.id, slug = %city.slug, user = %editor.0.username, "City created");
    Ok((StatusCode::CREATED, Json(city)))
}

async fn update_city(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<City>> {
    let id = parse_document_id(&id)?;
    let patch: CityPatch = serde_json::from_value(payload)
        .map_err(|e| ApiError::Validation(format!("City validation failed: {e}")))?;
    patch.validate()?;

    let mut city = state
        .store()
        .find_city(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(CITY_NOT_FOUND.into()))?;
    city.apply(patch);

    let city = state.store().update_city(city).await?;

    tracing::info!(city_id = %city.id, user = %editor.0.username, "City updated");
    Ok(Json(city))
}

async fn delete_city(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_document_id(&id)?;
    if !state.store().delete_city(id).await? {
        return Err(ApiError::NotFound(CITY_NOT_FOUND.into()));
    }

    tracing::info!(city_id = %id, user = %editor.0.username, "City deleted");
    Ok(Json(json!({ "message": "City removed" })))
}
