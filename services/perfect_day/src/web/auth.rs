//! services/perfect_day/src/web/auth.rs
//!
//! Authentication endpoints for signup, login, logout and the current user.
//! Identity is a bare username; there are no passwords.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use perfect_day_core::domain::User;
use perfect_day_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::web::middleware::{session_token, SESSION_COOKIE};
use crate::web::response::{envelope, rfc3339, ApiFailure, UserResponse};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    /// IANA zone name, `UTC` when omitted.
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: String,
    pub expires_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub session: SessionResponse,
}

fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_seconds
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Register a new username
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Invalid or taken username"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(req) = payload.map_err(|e| ApiFailure::bad_request(e.body_text()))?;

    let timezone = req.timezone.as_deref().unwrap_or("UTC");
    let user = User::new(&req.username, timezone).map_err(PortError::from)?;

    if state.storage.user_exists(user.username()).await {
        return Err(ApiFailure::bad_request("username already exists"));
    }
    state.storage.save_user(&user).await.map_err(|e| {
        error!("Failed to create user: {:?}", e);
        ApiFailure::from(e)
    })?;
    info!("Registered user {}", user.username());

    Ok((StatusCode::CREATED, envelope(UserResponse::from(&user))))
}

/// POST /auth/login - Open a session for an existing user
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request"),
        (status = 401, description = "Unknown user")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(req) = payload.map_err(|e| ApiFailure::bad_request(e.body_text()))?;
    if req.username.trim().is_empty() {
        return Err(ApiFailure::bad_request("username is required"));
    }

    let (user, session) = state
        .sessions
        .login(req.username.trim())
        .await
        .map_err(|e| match e {
            PortError::NotFound(_) => ApiFailure::new(
                StatusCode::UNAUTHORIZED,
                "USER_NOT_FOUND",
                "User not found",
            ),
            other => ApiFailure::from(other),
        })?;

    let cookie = session_cookie(&session.token, state.sessions.ttl().num_seconds());
    let response = LoginResponse {
        user: UserResponse::from(&user),
        session: SessionResponse {
            id: session.token,
            expires_at: rfc3339(session.expires_at),
        },
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], envelope(response)))
}

/// GET /auth/me - The user behind the current session
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me_handler(Extension(user): Extension<User>) -> impl IntoResponse {
    envelope(UserResponse::from(&user))
}

/// POST /auth/logout - Drop the session and clear the cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Logout successful")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.logout(&token).await;
    }
    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, session_cookie("", 0))],
    )
}
