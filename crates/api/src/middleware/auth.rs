//! Bearer-token authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use cityfolio_core::auth::token::verify_token;
use cityfolio_core::auth::User;

use crate::error::ApiError;
use crate::state::AppState;

pub const NO_TOKEN: &str = "Access denied. No token provided.";
pub const INACTIVE_OR_UNKNOWN: &str = "Invalid token or user not active.";

/// The account behind a valid bearer token, freshly loaded from the store.
///
/// The role is taken from the stored account rather than the token claims,
/// so a demotion or deactivation applies to tokens already issued.
///
/// ```ignore
/// async fn me(AuthUser(user): AuthUser) -> Json<UserProfile> {
///     Json(UserProfile::from(&user))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Second space-separated element of the `Authorization` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.into()))?;

        let claims = verify_token(token, state.tokens())?;

        let user = state
            .store()
            .find_user(claims.user_id)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| ApiError::Unauthorized(INACTIVE_OR_UNKNOWN.into()))?;

        Ok(AuthUser(user))
    }
}
