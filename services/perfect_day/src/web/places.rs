//! services/perfect_day/src/web/places.rs
//!
//! Place lookup and the list of known areas.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use perfect_day_core::domain::{suggest_area_from_address, PlaceResult};
use perfect_day_core::search::unique_areas;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;
use utoipa::{IntoParams, ToSchema};

use crate::web::response::{envelope, ApiFailure, Envelope, ErrorEnvelope, Meta};
use crate::web::rest::parse_or;
use crate::web::state::AppState;

const DEFAULT_PLACES_LIMIT: i64 = 10;
const MAX_PLACES_LIMIT: i64 = 50;
const FALLBACK_NOTICE: &str = "Places API unavailable, showing fallback results";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlaceSearchQuery {
    pub q: Option<String>,
    /// 1 to 50; anything else means 10.
    pub limit: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PlaceResponse {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Neighbourhood guessed from the address.
    pub suggested_area: String,
}

impl From<PlaceResult> for PlaceResponse {
    fn from(place: PlaceResult) -> Self {
        Self {
            suggested_area: suggest_area_from_address(&place.address),
            place_id: place.place_id,
            name: place.name,
            address: place.address,
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PlaceSearchResponse {
    pub places: Vec<PlaceResponse>,
    pub query: String,
    pub limit: i64,
}

#[derive(Serialize, ToSchema)]
pub struct AreasResponse {
    pub areas: Vec<String>,
}

/// Search the places provider.
///
/// A provider failure is not an error for the caller: the response is an
/// empty list with a notice in `meta`.
#[utoipa::path(
    get,
    path = "/api/v1/places/search",
    params(PlaceSearchQuery),
    responses(
        (status = 200, description = "Matching places", body = PlaceSearchResponse),
        (status = 400, description = "Missing query", body = ErrorEnvelope)
    )
)]
pub async fn search_places_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PlaceSearchQuery>,
) -> Result<impl IntoResponse, ApiFailure> {
    let query = params.q.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err(ApiFailure::new(
            axum::http::StatusCode::BAD_REQUEST,
            "MISSING_QUERY",
            "Search query is required",
        ));
    }

    let limit = match parse_or(params.limit.as_deref(), DEFAULT_PLACES_LIMIT) {
        l if (1..=MAX_PLACES_LIMIT).contains(&l) => l,
        _ => DEFAULT_PLACES_LIMIT,
    };

    let response = match state.places.search_places(&query).await {
        Ok(places) => Envelope {
            data: PlaceSearchResponse {
                places: places
                    .into_iter()
                    .take(limit as usize)
                    .map(PlaceResponse::from)
                    .collect(),
                query,
                limit,
            },
            meta: Meta::now(),
        },
        Err(e) => {
            warn!("Place search for '{}' failed: {}", query, e);
            Envelope {
                data: PlaceSearchResponse {
                    places: Vec::new(),
                    query,
                    limit,
                },
                meta: Meta::with_notice(FALLBACK_NOTICE),
            }
        }
    };
    Ok(Json(response))
}

/// Every area used by a live perfect day.
#[utoipa::path(
    get,
    path = "/api/v1/areas",
    responses(
        (status = 200, description = "Sorted distinct areas", body = AreasResponse)
    )
)]
pub async fn list_areas_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let days = state.storage.list_all_days(false).await;
    envelope(AreasResponse {
        areas: unique_areas(&days),
    })
}
