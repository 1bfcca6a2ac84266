//! Login and self-service account endpoints.

use axum::extract::State;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use cityfolio_core::auth::password::{hash_password, validate_password_strength, verify_password};
use cityfolio_core::auth::token::issue_token;
use cityfolio_core::auth::{User, UserProfile};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/update-profile", put(update_profile))
        .route("/auth/change-password", put(change_password))
        .route("/auth/reset-account", post(reset_account))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
}

fn hash(password: &str) -> ApiResult<String> {
    hash_password(password).map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

fn password_matches(password: &str, user: &User) -> ApiResult<bool> {
    verify_password(password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("stored password hash unreadable: {e}")))
}

async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    if input.username.is_empty() || input.password.is_empty() {
        return Err(ApiError::Validation(
            "Username and password are required".into(),
        ));
    }

    let user = state
        .store()
        .find_user_by_username(&input.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    if !password_matches(&input.password, &user)? {
        tracing::warn!(username = %input.username, "Failed login attempt");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    if !user.is_active {
        return Err(ApiError::Unauthorized("Account is deactivated".into()));
    }

    let token = issue_token(user.id, user.role, state.tokens())?;

    let mut user = user;
    user.last_login = Some(Utc::now());
    let user = state.store().update_user(user).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
    Ok(Json(LoginResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

async fn me(AuthUser(user): AuthUser) -> Json<Value> {
    Json(json!({ "user": UserProfile::from(&user) }))
}

async fn update_profile(
    AuthUser(mut user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfileRequest>,
) -> ApiResult<Json<Value>> {
    if let Some(username) = input.username {
        let username = username.trim().to_string();
        if username.is_empty() {
            return Err(ApiError::Validation("Username cannot be empty".into()));
        }
        user.username = username;
    }
    if let Some(email) = input.email {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApiError::Validation("Email cannot be empty".into()));
        }
        user.email = email;
    }

    let user = state.store().update_user(user).await?;

    tracing::info!(user_id = %user.id, "Profile updated");
    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": UserProfile::from(&user),
    })))
}

async fn change_password(
    AuthUser(mut user): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ChangePasswordRequest>,
) -> ApiResult<Json<Value>> {
    if !password_matches(&input.current_password, &user)? {
        return Err(ApiError::Validation("Current password is incorrect".into()));
    }
    validate_password_strength(&input.new_password).map_err(ApiError::Validation)?;

    user.password_hash = hash(&input.new_password)?;
    let user = state.store().update_user(user).await?;

    tracing::info!(user_id = %user.id, "Password changed");
    Ok(Json(json!({ "message": "Password changed successfully" })))
}

/// Restore the caller's credentials to the configured bootstrap account.
async fn reset_account(
    RequireAdmin(AuthUser(mut user)): RequireAdmin,
    State(state): State<AppState>,
) -> ApiResult<Json<Value>> {
    let admin = &state.config().admin;
    user.username = admin.username.clone();
    user.email = admin.email.clone();
    user.password_hash = hash(&admin.password)?;

    let user = state.store().update_user(user).await?;

    tracing::warn!(user_id = %user.id, "Account reset to default credentials");
    Ok(Json(json!({
        "message": "Account reset to default credentials",
        "user": UserProfile::from(&user),
    })))
}
