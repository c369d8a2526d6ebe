//! services/perfect_day/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use perfect_day_core::domain::User;
use std::sync::Arc;
use tracing::debug;

use crate::web::response::ApiFailure;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "session_id";

/// Pulls the session token out of the `Cookie` header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|c| {
        c.trim()
            .strip_prefix(SESSION_COOKIE)
            .and_then(|rest| rest.strip_prefix('='))
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    })
}

/// Resolves the caller's user without rejecting anonymous requests.
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = session_token(headers)?;
    state.sessions.validate(&token).await.ok()
}

/// Middleware that validates the session cookie and resolves the user.
///
/// If valid, inserts the `User` into request extensions for handlers to use.
/// If invalid, expired or missing, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiFailure> {
    let token = session_token(req.headers()).ok_or_else(ApiFailure::unauthorized)?;

    let user = state.sessions.validate(&token).await.map_err(|e| {
        debug!("Rejected session: {:?}", e);
        ApiFailure::from(e)
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
