//! services/perfect_day/src/web/users.rs
//!
//! Public user profiles and per-user listings.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use perfect_day_core::domain::validate_username;
use perfect_day_core::search::{search, SearchCriteria};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::web::middleware::current_user;
use crate::web::response::{envelope, ApiFailure, DayListResponse, ErrorEnvelope, UserResponse};
use crate::web::rest::{parse_or, DEFAULT_PAGE_LIMIT};
use crate::web::state::AppState;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserDaysQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
    /// Only honoured when the caller is logged in as this user.
    pub include_deleted: Option<String>,
}

/// A name that could never have been registered is simply not found.
async fn ensure_user(state: &AppState, username: &str) -> Result<(), ApiFailure> {
    if validate_username(username).is_ok() && state.storage.user_exists(username).await {
        Ok(())
    } else {
        Err(ApiFailure::new(
            axum::http::StatusCode::NOT_FOUND,
            "USER_NOT_FOUND",
            "User not found",
        ))
    }
}

/// Public profile of one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    )
)]
pub async fn get_user_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, ApiFailure> {
    ensure_user(&state, &username).await?;
    let user = state.storage.load_user(&username).await?;
    Ok(envelope(UserResponse::from(&user)))
}

/// One user's perfect days, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/perfect-days",
    params(("username" = String, Path, description = "Username"), UserDaysQuery),
    responses(
        (status = 200, description = "A page of the user's perfect days", body = DayListResponse),
        (status = 404, description = "Unknown user", body = ErrorEnvelope)
    )
)]
pub async fn list_user_days_handler(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(query): Query<UserDaysQuery>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiFailure> {
    ensure_user(&state, &username).await?;

    let wants_deleted = query.include_deleted.as_deref() == Some("true");
    let include_deleted = wants_deleted
        && current_user(&state, &headers)
            .await
            .is_some_and(|caller| caller.username() == username);

    let mut limit = parse_or(query.limit.as_deref(), DEFAULT_PAGE_LIMIT);
    if limit <= 0 {
        limit = DEFAULT_PAGE_LIMIT;
    }
    let offset = parse_or(query.offset.as_deref(), 0).max(0);

    let days = state
        .storage
        .list_days_by_owner(&username, include_deleted)
        .await;
    let criteria = SearchCriteria {
        username: Some(username),
        limit,
        offset,
        ..Default::default()
    };
    let result = search(days, &criteria);
    Ok(envelope(DayListResponse::from(&result)))
}
