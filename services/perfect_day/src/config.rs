//! services/perfect_day/src/config.rs
//!
//! Defines the API server's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error("Could not read or write the config file {0}: {1}")]
    File(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub data_dir: PathBuf,
    pub log_level: Level,
    pub google_places_api_key: Option<String>,
    pub places_base_url: String,
    pub cors_allowed_origin: String,
    pub session_ttl_hours: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Storage Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let data_dir = lookup("DATA_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.perfect-day"));

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Places Provider (optional) ---
        let google_places_api_key = lookup("GOOGLE_PLACES_API_KEY").filter(|v| !v.is_empty());
        let places_base_url = lookup("PLACES_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string());

        // --- Web Settings ---
        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let session_ttl_hours = match lookup("SESSION_TTL_HOURS") {
            None => perfect_day_core::sessions::DEFAULT_SESSION_TTL_HOURS,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "SESSION_TTL_HOURS".to_string(),
                        format!("'{}' is not a positive number of hours", raw),
                    ))
                }
            },
        };

        Ok(Self {
            bind_address,
            data_dir,
            log_level,
            google_places_api_key,
            places_base_url,
            cors_allowed_origin,
            session_ttl_hours,
        })
    }
}
