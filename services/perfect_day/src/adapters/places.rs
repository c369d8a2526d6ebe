//! services/perfect_day/src/adapters/places.rs
//!
//! This module contains the adapter for the Google Places web service.
//! It implements the `PlacesService` port from the `core` crate using the
//! Text Search and Place Details JSON endpoints. Without an API key the
//! adapter is constructed in a disabled state and every lookup reports
//! `Unavailable`.

use async_trait::async_trait;
use perfect_day_core::domain::PlaceResult;
use perfect_day_core::ports::{PlacesService, PortError, PortResult};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An adapter that implements the `PlacesService` port over plain HTTP.
#[derive(Clone)]
pub struct GooglePlacesAdapter {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

//=========================================================================================
// Provider Response Shapes
//=========================================================================================

#[derive(Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceRecord>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceRecord>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceRecord {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    geometry: Option<GeometryRecord>,
}

#[derive(Deserialize)]
struct GeometryRecord {
    location: LatLngRecord,
}

#[derive(Deserialize)]
struct LatLngRecord {
    lat: f64,
    lng: f64,
}

impl PlaceRecord {
    fn to_domain(self) -> PlaceResult {
        let (latitude, longitude) = self
            .geometry
            .map(|g| (g.location.lat, g.location.lng))
            .unwrap_or((0.0, 0.0));
        PlaceResult {
            place_id: self.place_id,
            name: self.name,
            address: self.formatted_address,
            latitude,
            longitude,
        }
    }
}

fn check_status(status: &str, error_message: Option<String>) -> PortResult<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "NOT_FOUND" => Err(PortError::NotFound(
            error_message.unwrap_or_else(|| "place not found".to_string()),
        )),
        other => Err(PortError::Unavailable(match error_message {
            Some(message) => format!("places provider returned {}: {}", other, message),
            None => format!("places provider returned {}", other),
        })),
    }
}

fn parse_text_search(body: &str) -> PortResult<Vec<PlaceResult>> {
    let response: TextSearchResponse = serde_json::from_str(body)
        .map_err(|e| PortError::Unavailable(format!("malformed places response: {}", e)))?;
    check_status(&response.status, response.error_message)?;
    Ok(response
        .results
        .into_iter()
        .map(PlaceRecord::to_domain)
        .collect())
}

fn parse_details(body: &str) -> PortResult<PlaceResult> {
    let response: DetailsResponse = serde_json::from_str(body)
        .map_err(|e| PortError::Unavailable(format!("malformed place details: {}", e)))?;
    check_status(&response.status, response.error_message)?;
    response
        .result
        .map(PlaceRecord::to_domain)
        .ok_or_else(|| PortError::NotFound("place not found".to_string()))
}

//=========================================================================================
// Constructor and HTTP Plumbing
//=========================================================================================

impl GooglePlacesAdapter {
    /// Creates a new adapter. An absent or empty key yields a disabled adapter.
    pub fn new(api_key: Option<String>, base_url: &str) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PortError::Unexpected(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// An adapter that never reaches the network.
    pub fn disabled() -> PortResult<Self> {
        Self::new(None, crate::config::DEFAULT_PLACES_BASE_URL)
    }

    fn api_key(&self) -> PortResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| PortError::Unavailable("Google Places API is not enabled".to_string()))
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> PortResult<String> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(format!("places request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            warn!("Places provider responded with HTTP {}", status);
            return Err(PortError::Unavailable(format!(
                "places provider responded with HTTP {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PortError::Unavailable(format!("failed to read places response: {}", e)))
    }
}

//=========================================================================================
// `PlacesService` Trait Implementation
//=========================================================================================

#[async_trait]
impl PlacesService for GooglePlacesAdapter {
    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search_places(&self, query: &str) -> PortResult<Vec<PlaceResult>> {
        let key = self.api_key()?;
        debug!("Searching places for '{}'", query);
        let body = self
            .get("place/textsearch/json", &[("query", query), ("key", key)])
            .await?;
        parse_text_search(&body)
    }

    async fn place_details(&self, place_id: &str) -> PortResult<PlaceResult> {
        let key = self.api_key()?;
        let body = self
            .get(
                "place/details/json",
                &[
                    ("place_id", place_id),
                    ("fields", "place_id,name,formatted_address,geometry"),
                    ("key", key),
                ],
            )
            .await?;
        parse_details(&body)
    }
}
