use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::Router;
use cityfolio_core::media::UploadFile;
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::{ApiError, ApiResult};
use crate::middleware::rbac::RequireEditor;
use crate::state::AppState;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

pub fn routes(max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_image))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_bytes))
}

/// Forward one image to the media host and answer with its URL as plain text.
async fn upload_image(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<String> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        file = Some(UploadFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let file = file.ok_or_else(|| {
        ApiError::Internal(format!("multipart request had no '{IMAGE_FIELD}' field"))
    })?;
    let size = file.bytes.len();

    let url = state.media().upload(file).await?;

    tracing::info!(size, url = %url, user = %editor.0.username, "Image uploaded");
    Ok(url)
}
