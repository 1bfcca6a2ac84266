use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cityfolio_core::auth::TokenError;
use cityfolio_core::document::ValidationError;
use cityfolio_core::media::MediaError;
use cityfolio_core::store::StoreError;
use serde_json::json;

/// API error type. Every variant renders as `{message, type, statusCode}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or incomplete input.
    #[error("{0}")]
    Validation(String),

    /// Missing credential, or a token naming an unknown/inactive account.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but lacking the role.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validationError", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::Token(err @ TokenError::Invalid) => {
                (StatusCode::FORBIDDEN, "invalidToken", err.to_string())
            }
            ApiError::Token(err @ TokenError::Expired) => {
                (StatusCode::FORBIDDEN, "tokenExpired", err.to_string())
            }
            ApiError::Token(err @ TokenError::Encoding(_)) => {
                tracing::error!(error = %err, "Token error");
                internal()
            }
            ApiError::Store(StoreError::Invalid(err)) => {
                (StatusCode::BAD_REQUEST, "validationError", err.to_string())
            }
            ApiError::Store(err @ StoreError::Conflict { .. }) => {
                (StatusCode::BAD_REQUEST, "validationError", err.to_string())
            }
            ApiError::Store(err @ StoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "notFound", err.to_string())
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                internal()
            }
            ApiError::Media(err) => {
                tracing::error!(error = %err, "Media host error");
                internal()
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "serverError",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = self.parts();

        let body = json!({
            "message": message,
            "type": error_type,
            "statusCode": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
