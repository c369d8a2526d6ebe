//! services/perfect_day/src/bin/api.rs

use perfect_day_lib::{
    adapters::{FileStore, GooglePlacesAdapter},
    config::Config,
    error::ApiError,
    web::{build_router, state::AppState},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Prepare Storage ---
    let storage = Arc::new(FileStore::new(config.data_dir.clone()));
    storage.initialize().await?;
    info!("Storing records under {}", config.data_dir.display());

    // --- 3. Initialize the Places Adapter ---
    let places = Arc::new(GooglePlacesAdapter::new(
        config.google_places_api_key.clone(),
        &config.places_base_url,
    )?);
    if config.google_places_api_key.is_none() {
        warn!("GOOGLE_PLACES_API_KEY is not set; place search will return fallback results");
    }

    // --- 4. Build the Shared AppState and Router ---
    let app_state = Arc::new(AppState::new(storage, places, config.clone()));
    let app = build_router(app_state)?;

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
