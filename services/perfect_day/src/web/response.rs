//! services/perfect_day/src/web/response.rs
//!
//! The JSON envelope shared by every endpoint, the error mapping from core
//! port errors to HTTP statuses, and the response payload structs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use perfect_day_core::domain::{Activity, Day, Location, User};
use perfect_day_core::ports::PortError;
use perfect_day_core::search::SearchResult;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

//=========================================================================================
// Envelope
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct Meta {
    pub timestamp: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl Meta {
    pub fn now() -> Self {
        Self {
            timestamp: rfc3339(Utc::now()),
            version: API_VERSION.to_string(),
            notice: None,
        }
    }

    pub fn with_notice(notice: &str) -> Self {
        Self {
            notice: Some(notice.to_string()),
            ..Self::now()
        }
    }
}

#[derive(Serialize)]
pub struct Envelope<T: Serialize> {
    pub data: T,
    pub meta: Meta,
}

/// Wraps `data` in the standard `{data, meta}` envelope.
pub fn envelope<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        data,
        meta: Meta::now(),
    })
}

pub fn rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

//=========================================================================================
// Errors
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
    pub meta: Meta,
}

/// A handler failure rendered as the error envelope.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Not authenticated")
    }
}

impl From<PortError> for ApiFailure {
    fn from(e: PortError) -> Self {
        match e {
            PortError::Validation(v) => Self::bad_request(v.to_string()),
            PortError::NotFound(message) => Self::not_found(message),
            PortError::InvalidSession => Self::unauthorized(),
            PortError::ExpiredSession => {
                Self::new(StatusCode::UNAUTHORIZED, "SESSION_EXPIRED", "Session expired")
            }
            PortError::Unavailable(message) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", message)
            }
            PortError::Storage(message) | PortError::Unexpected(message) => {
                error!("Request failed: {}", message);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorEnvelope {
            error: ErrorBody {
                code: self.code.to_string(),
                message: self.message,
            },
            meta: Meta::now(),
        };
        (self.status, Json(body)).into_response()
    }
}

//=========================================================================================
// Payloads
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub timezone: String,
    pub created_at: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            timezone: user.timezone().to_string(),
            created_at: rfc3339(user.created_at()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CoordinatesResponse {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Serialize, ToSchema)]
pub struct LocationResponse {
    /// `google_place` or `custom_text`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesResponse>,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        match location {
            Location::ExternalPlace(place) => Self {
                kind: "google_place".to_string(),
                place_id: Some(place.place_id().to_string()),
                name: location.name().to_string(),
                address: Some(place.address().to_string()),
                area: location.area().to_string(),
                coordinates: place.coordinates().map(|c| CoordinatesResponse {
                    latitude: c.latitude,
                    longitude: c.longitude,
                }),
            },
            Location::FreeformText(_) => Self {
                kind: "custom_text".to_string(),
                place_id: None,
                name: location.name().to_string(),
                address: None,
                area: location.area().to_string(),
                coordinates: None,
            },
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ActivityResponse {
    pub id: String,
    pub name: String,
    pub location: LocationResponse,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub description: String,
    pub commentary: String,
    pub created_at: String,
}

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id().to_string(),
            name: activity.name().to_string(),
            location: LocationResponse::from(activity.location()),
            start_time: activity.start_time().to_string(),
            end_time: activity.end_time(),
            duration_minutes: activity.duration_minutes(),
            description: activity.description().to_string(),
            commentary: activity.commentary().to_string(),
            created_at: rfc3339(activity.created_at()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DayResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub username: String,
    pub date: String,
    pub areas: Vec<String>,
    pub activities: Vec<ActivityResponse>,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Day> for DayResponse {
    fn from(day: &Day) -> Self {
        Self {
            id: day.id().to_string(),
            title: day.title().to_string(),
            description: day.description().to_string(),
            username: day.username().to_string(),
            date: day.date().to_string(),
            areas: day.areas().to_vec(),
            activities: day.activities().iter().map(ActivityResponse::from).collect(),
            is_deleted: day.is_deleted(),
            created_at: rfc3339(day.created_at()),
            updated_at: rfc3339(day.updated_at()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PaginationResponse {
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

#[derive(Serialize, ToSchema)]
pub struct DayListResponse {
    pub items: Vec<DayResponse>,
    pub pagination: PaginationResponse,
}

impl From<&SearchResult> for DayListResponse {
    fn from(result: &SearchResult) -> Self {
        Self {
            items: result.items.iter().map(DayResponse::from).collect(),
            pagination: PaginationResponse {
                total: result.total,
                limit: result.limit,
                offset: result.offset,
                has_more: result.has_more(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfect_day_core::domain::ValidationError;

    #[test]
    fn port_errors_map_to_statuses() {
        let cases = [
            (PortError::Validation(ValidationError::EmptyTitle), StatusCode::BAD_REQUEST),
            (PortError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (PortError::InvalidSession, StatusCode::UNAUTHORIZED),
            (PortError::ExpiredSession, StatusCode::UNAUTHORIZED),
            (PortError::Unavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
            (PortError::Storage("disk".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (PortError::Unexpected("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiFailure::from(error).status, status);
        }
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let failure = ApiFailure::from(PortError::Storage("/secret/path".into()));
        assert!(!failure.message.contains("/secret"));
    }

    #[test]
    fn location_response_carries_type_tag() {
        let custom = LocationResponse::from(&Location::freeform("Park", "Ueno"));
        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json["type"], "custom_text");
        assert!(json.get("place_id").is_none());
    }
}
