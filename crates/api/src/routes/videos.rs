use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use cityfolio_core::document::{parse_document_id, NewVideo, Video};
use serde_json::{json, Value};

use super::render_all;
use crate::error::{ApiError, ApiResult};
use crate::middleware::language::{ContentLanguage, ViewParams};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Videos are created and deleted but never edited in place.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route("/videos/{id}", delete(delete_video))
}

async fn list_videos(
    State(state): State<AppState>,
    ContentLanguage(lang): ContentLanguage,
    Query(view): Query<ViewParams>,
) -> ApiResult<Response> {
    let videos = state.store().list_videos().await?;
    Ok(render_all(&videos, &view, &lang))
}

async fn create_video(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let new_video: NewVideo = serde_json::from_value(payload)
        .map_err(|e| ApiError::Validation(format!("Video validation failed: {e}")))?;

    let video = state.store().insert_video(new_video).await?;

    tracing::info!(video_id = %video.id, user = %editor.0.username, "Video created");
    Ok((StatusCode::CREATED, Json(video)))
}

async fn delete_video(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_document_id(&id)?;
    if !state.store().delete_video(id).await? {
        return Err(ApiError::NotFound("Video not found".into()));
    }

    tracing::info!(video_id = %id, user = %editor.0.username, "Video deleted");
    Ok(Json(json!({ "message": "Video removed" })))
}
