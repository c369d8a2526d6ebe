//! services/perfect_day/src/web/rest.rs
//!
//! Contains the Axum handlers for the perfect-day endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::response::{
    envelope, ActivityResponse, ApiFailure, CoordinatesResponse, DayListResponse, DayResponse,
    ErrorBody, ErrorEnvelope, LocationResponse, Meta, PaginationResponse, UserResponse,
};
use crate::web::state::AppState;
use crate::web::{auth, health, places, users};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use perfect_day_core::domain::{Activity, Coordinates, Day, Location, User, ValidationError};
use perfect_day_core::ports::PortError;
use perfect_day_core::search::{search, SearchCriteria, SortKey};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};
use uuid::Uuid;

pub const DEFAULT_PAGE_LIMIT: i64 = 10;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_handler,
        health::version_handler,
        auth::signup_handler,
        auth::login_handler,
        auth::me_handler,
        auth::logout_handler,
        list_days_handler,
        create_day_handler,
        get_day_handler,
        update_day_handler,
        delete_day_handler,
        users::get_user_handler,
        users::list_user_days_handler,
        places::search_places_handler,
        places::list_areas_handler,
    ),
    components(
        schemas(
            DayRequest, ActivityRequest, LocationRequest,
            DayResponse, ActivityResponse, LocationResponse, CoordinatesResponse,
            DayListResponse, PaginationResponse, UserResponse, Meta, ErrorBody, ErrorEnvelope,
            auth::SignupRequest, auth::LoginRequest, auth::LoginResponse, auth::SessionResponse,
            places::PlaceResponse, places::PlaceSearchResponse, places::AreasResponse,
            health::HealthResponse, health::VersionResponse,
        )
    ),
    tags(
        (name = "Perfect Day API", description = "Share and discover perfect days.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LocationRequest {
    /// `google_place` or `custom_text`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationRequest {
    fn to_domain(&self) -> Result<Location, ValidationError> {
        if self.kind != "google_place" {
            return Ok(Location::freeform(&self.name, &self.area));
        }
        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Location::external_place(
            &self.place_id,
            &self.name,
            &self.address,
            &self.area,
            coordinates,
        )
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ActivityRequest {
    pub name: String,
    pub location: LocationRequest,
    /// `HH:MM`
    pub start_time: String,
    #[serde(alias = "duration")]
    pub duration_minutes: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commentary: String,
}

impl ActivityRequest {
    fn to_domain(&self) -> Result<Activity, ValidationError> {
        Activity::new(
            &Uuid::new_v4().to_string(),
            &self.name,
            self.location.to_domain()?,
            &self.start_time,
            self.duration_minutes,
            &self.description,
            &self.commentary,
        )
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DayRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub activities: Vec<ActivityRequest>,
}

impl DayRequest {
    /// Builds the activity list in request order, then orders it by start time.
    fn activities(&self) -> Result<Vec<Activity>, ValidationError> {
        let mut activities = self
            .activities
            .iter()
            .map(ActivityRequest::to_domain)
            .collect::<Result<Vec<_>, _>>()?;
        activities.sort_by(|a, b| a.start_time().cmp(b.start_time()));
        Ok(activities)
    }
}

#[derive(Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct ListDaysQuery {
    /// Free-text terms, all of which must match.
    pub q: Option<String>,
    /// Restrict to one author.
    pub user: Option<String>,
    /// Comma-separated area names; any match counts.
    pub areas: Option<String>,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// `date`, `created_at` or `title`.
    pub sort: Option<String>,
    /// `asc` or `desc`.
    pub order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Lenient integer parsing: anything unusable degrades to `default`.
pub fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(default)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ListDaysQuery {
    fn into_criteria(self) -> SearchCriteria {
        let areas = self
            .areas
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|area| !area.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        SearchCriteria {
            query: self.q.unwrap_or_default(),
            username: non_empty(self.user),
            areas,
            date_from: non_empty(self.from),
            date_to: non_empty(self.to),
            sort: SortKey::parse(self.sort.as_deref(), self.order.as_deref()),
            limit: parse_or(self.limit.as_deref(), DEFAULT_PAGE_LIMIT),
            offset: parse_or(self.offset.as_deref(), 0).max(0),
        }
    }
}

/// Finds a live day by id across every owner.
async fn find_live_day(state: &AppState, id: &str) -> Result<Day, ApiFailure> {
    state
        .storage
        .list_all_days(false)
        .await
        .into_iter()
        .find(|day| day.id() == id)
        .ok_or_else(|| ApiFailure::not_found("Perfect day not found"))
}

/// Like `find_live_day`, but anything not owned by `user` is reported as missing.
async fn find_owned_day(state: &AppState, user: &User, id: &str) -> Result<Day, ApiFailure> {
    let day = find_live_day(state, id).await?;
    if day.username() != user.username() {
        return Err(ApiFailure::not_found("Perfect day not found"));
    }
    Ok(day)
}

fn invalid_body(e: JsonRejection) -> ApiFailure {
    ApiFailure::bad_request(e.body_text())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List and search perfect days.
#[utoipa::path(
    get,
    path = "/api/v1/perfect-days",
    params(ListDaysQuery),
    responses(
        (status = 200, description = "A page of matching perfect days", body = DayListResponse)
    )
)]
pub async fn list_days_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListDaysQuery>,
) -> impl IntoResponse {
    let criteria = query.into_criteria();
    let days = state.storage.list_all_days(false).await;
    let result = search(days, &criteria);
    envelope(DayListResponse::from(&result))
}

/// Create a perfect day owned by the logged-in user.
#[utoipa::path(
    post,
    path = "/api/v1/perfect-days",
    request_body = DayRequest,
    responses(
        (status = 201, description = "Perfect day created", body = DayResponse),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope)
    )
)]
pub async fn create_day_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    payload: Result<Json<DayRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(req) = payload.map_err(invalid_body)?;

    let build = || -> Result<Day, ValidationError> {
        let mut day = Day::new(
            &Uuid::new_v4().to_string(),
            &req.title,
            &req.description,
            user.username(),
            &req.date,
        )?;
        for activity in req.activities()? {
            day.add_activity(activity);
        }
        Ok(day)
    };
    let day = build().map_err(PortError::from)?;

    state.storage.save_day(&day).await.map_err(|e| {
        error!("Failed to save perfect day: {:?}", e);
        ApiFailure::from(e)
    })?;
    info!("{} created perfect day {}", user.username(), day.id());

    Ok((StatusCode::CREATED, envelope(DayResponse::from(&day))))
}

/// Fetch one perfect day.
#[utoipa::path(
    get,
    path = "/api/v1/perfect-days/{id}",
    params(("id" = String, Path, description = "Perfect day id")),
    responses(
        (status = 200, description = "The perfect day", body = DayResponse),
        (status = 404, description = "Missing or deleted", body = ErrorEnvelope)
    )
)]
pub async fn get_day_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiFailure> {
    let day = find_live_day(&state, &id).await?;
    Ok(envelope(DayResponse::from(&day)))
}

/// Replace the editable fields of one of the caller's perfect days.
#[utoipa::path(
    put,
    path = "/api/v1/perfect-days/{id}",
    params(("id" = String, Path, description = "Perfect day id")),
    request_body = DayRequest,
    responses(
        (status = 200, description = "Updated perfect day", body = DayResponse),
        (status = 400, description = "Validation failure", body = ErrorEnvelope),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "Not found or not owned", body = ErrorEnvelope)
    )
)]
pub async fn update_day_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    payload: Result<Json<DayRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiFailure> {
    let Json(req) = payload.map_err(invalid_body)?;
    let mut day = find_owned_day(&state, &user, &id).await?;

    let activities = req.activities().map_err(PortError::from)?;
    day.revise(&req.title, &req.description, &req.date, activities)
        .map_err(PortError::from)?;

    state.storage.save_day(&day).await.map_err(|e| {
        error!("Failed to update perfect day: {:?}", e);
        ApiFailure::from(e)
    })?;

    Ok(envelope(DayResponse::from(&day)))
}

/// Soft-delete one of the caller's perfect days.
#[utoipa::path(
    delete,
    path = "/api/v1/perfect-days/{id}",
    params(("id" = String, Path, description = "Perfect day id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Not authenticated", body = ErrorEnvelope),
        (status = 404, description = "Not found or not owned", body = ErrorEnvelope)
    )
)]
pub async fn delete_day_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiFailure> {
    let mut day = find_owned_day(&state, &user, &id).await?;
    day.soft_delete();
    state.storage.save_day(&day).await.map_err(|e| {
        error!("Failed to delete perfect day: {:?}", e);
        ApiFailure::from(e)
    })?;
    info!("{} deleted perfect day {}", user.username(), day.id());

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_degrades_bad_numbers_and_splits_areas() {
        let query = ListDaysQuery {
            areas: Some("Shibuya, Asakusa,,".to_string()),
            limit: Some("lots".to_string()),
            offset: Some("-4".to_string()),
            user: Some(String::new()),
            ..Default::default()
        };
        let criteria = query.into_criteria();
        assert_eq!(criteria.areas, ["Shibuya", "Asakusa"]);
        assert_eq!(criteria.limit, DEFAULT_PAGE_LIMIT);
        assert_eq!(criteria.offset, 0);
        assert_eq!(criteria.username, None);
    }

    #[test]
    fn location_request_picks_variant_by_type() {
        let place = LocationRequest {
            kind: "google_place".to_string(),
            place_id: "ChIJ1".to_string(),
            name: "Senso-ji".to_string(),
            area: "Asakusa".to_string(),
            address: String::new(),
            latitude: Some(35.7),
            longitude: Some(139.8),
        };
        assert!(matches!(place.to_domain(), Ok(Location::ExternalPlace(_))));

        let missing_id = LocationRequest {
            place_id: String::new(),
            ..place
        };
        assert_eq!(missing_id.to_domain(), Err(ValidationError::MissingPlaceId));

        let custom = LocationRequest {
            kind: "custom_text".to_string(),
            ..missing_id
        };
        assert!(matches!(custom.to_domain(), Ok(Location::FreeformText(_))));
    }

    #[test]
    fn openapi_document_lists_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/perfect-days/{id}"));
        assert!(doc.paths.paths.contains_key("/api/v1/places/search"));
    }
}
