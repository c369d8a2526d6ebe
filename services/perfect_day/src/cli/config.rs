//! services/perfect_day/src/cli/config.rs
//!
//! The terminal client's settings file (`~/.perfect-day/config.json`) and the
//! remembered login (`<data_dir>/current_user`).

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_DIR_NAME: &str = ".perfect-day";
pub const CONFIG_FILE_NAME: &str = "config.json";
const CURRENT_USER_FILE: &str = "current_user";

#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct CliConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_places_api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_directory: Option<PathBuf>,
}

impl CliConfig {
    /// `~/.perfect-day`
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .ok_or_else(|| ConfigError::MissingVar("HOME".to_string()))
    }

    /// Reads the settings file. A missing file is an empty configuration.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(file_error(path, e)),
        };
        serde_json::from_slice(&data).map_err(|e| file_error(path, e))
    }

    pub async fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| file_error(parent, e))?;
        }
        let data = serde_json::to_vec_pretty(self).map_err(|e| file_error(path, e))?;
        fs::write(path, data).await.map_err(|e| file_error(path, e))
    }

    /// Applies `GOOGLE_PLACES_API_KEY` and `PERFECT_DAY_DATA_DIR` on top of the file.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GOOGLE_PLACES_API_KEY").filter(|v| !v.is_empty()) {
            self.google_places_api_key = Some(key);
        }
        if let Some(dir) = lookup("PERFECT_DAY_DATA_DIR").filter(|v| !v.is_empty()) {
            self.data_directory = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn data_dir_or(&self, default_dir: &Path) -> PathBuf {
        self.data_directory
            .clone()
            .unwrap_or_else(|| default_dir.to_path_buf())
    }
}

fn file_error(path: &Path, e: impl std::fmt::Display) -> ConfigError {
    ConfigError::File(path.display().to_string(), e.to_string())
}

//=========================================================================================
// Remembered Login
//=========================================================================================

pub async fn read_current_user(data_dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(data_dir.join(CURRENT_USER_FILE)).await.ok()?;
    let username = raw.trim();
    (!username.is_empty()).then(|| username.to_string())
}

pub async fn write_current_user(data_dir: &Path, username: &str) -> std::io::Result<()> {
    fs::create_dir_all(data_dir).await?;
    fs::write(data_dir.join(CURRENT_USER_FILE), username).await
}

/// Returns whether anyone was logged in.
pub async fn clear_current_user(data_dir: &Path) -> std::io::Result<bool> {
    match fs::remove_file(data_dir.join(CURRENT_USER_FILE)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
