//! Role checks layered on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.0.role.is_admin() {
            return Err(ApiError::Forbidden(
                "Access denied. Admin privileges required.".into(),
            ));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `editor` or `admin`. Guards every content mutation.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.0.role.can_edit_content() {
            return Err(ApiError::Forbidden(
                "Access denied. Editor privileges required.".into(),
            ));
        }
        Ok(RequireEditor(user))
    }
}
