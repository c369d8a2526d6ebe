//! services/perfect_day/src/adapters/fs_store.rs
//!
//! This module contains the file store adapter, which is the concrete implementation
//! of the `StorageService` port from the `core` crate. Every record lives in its
//! own pretty-printed JSON file:
//!
//! ```text
//! <data_dir>/users/<username>.json
//! <data_dir>/perfect-days/<username>/<id>.json
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use perfect_day_core::domain::{Activity, Coordinates, Day, DayParts, Location, User};
use perfect_day_core::ports::{PortError, PortResult, StorageService};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

const USERS_DIR: &str = "users";
const DAYS_DIR: &str = "perfect-days";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `StorageService` port on a directory tree.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a new `FileStore` rooted at `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates the root directory if it does not exist yet.
    pub async fn initialize(&self) -> PortResult<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| storage_error("failed to create data directory", e))
    }

    fn user_path(&self, username: &str) -> PortResult<PathBuf> {
        Ok(self
            .data_dir
            .join(USERS_DIR)
            .join(format!("{}.json", file_key(username)?)))
    }

    fn owner_dir(&self, username: &str) -> PortResult<PathBuf> {
        Ok(self.data_dir.join(DAYS_DIR).join(file_key(username)?))
    }

    fn day_path(&self, username: &str, id: &str) -> PortResult<PathBuf> {
        Ok(self.owner_dir(username)?.join(format!("{}.json", file_key(id)?)))
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> PortResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error("failed to create directory", e))?;
        }
        let data = serde_json::to_vec_pretty(value)
            .map_err(|e| PortError::Storage(format!("failed to encode record: {}", e)))?;

        // Write to a sibling temp file and rename so readers never see half a record.
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, data)
            .await
            .map_err(|e| storage_error("failed to write record", e))?;
        fs::rename(&temp_path, path)
            .await
            .map_err(|e| storage_error("failed to move record into place", e))
    }

    async fn read_day_file(&self, path: &Path) -> PortResult<Day> {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PortError::NotFound(format!(
                    "perfect day not found: {}",
                    path.display()
                )))
            }
            Err(e) => return Err(storage_error("failed to read perfect day file", e)),
        };
        let record: DayRecord = serde_json::from_slice(&data)
            .map_err(|e| PortError::Storage(format!("failed to decode perfect day: {}", e)))?;
        record.to_domain()
    }

    async fn list_owner_dir(&self, username: &str, include_deleted: bool) -> Vec<Day> {
        let Ok(dir) = self.owner_dir(username) else {
            return Vec::new();
        };
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let mut days = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Stopped listing {}: {}", dir.display(), e);
                    break;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            match self.read_day_file(&path).await {
                Ok(day) if include_deleted || !day.is_deleted() => days.push(day),
                Ok(_) => {}
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        // Directory order is platform-dependent; pin it down.
        days.sort_by(|a, b| a.id().cmp(b.id()));
        days
    }
}

/// Usernames and ids become single path components, so only letters, digits,
/// `-` and `_` are allowed. Anything else cannot name a stored record.
fn file_key(value: &str) -> PortResult<&str> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(value)
    } else {
        Err(PortError::NotFound(format!("no record named {:?}", value)))
    }
}

fn storage_error(context: &str, e: std::io::Error) -> PortError {
    PortError::Storage(format!("{}: {}", context, e))
}

//=========================================================================================
// "Impure" Record Structs (the on-disk JSON shape)
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct UserRecord {
    username: String,
    timezone: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn from_domain(user: &User) -> Self {
        Self {
            username: user.username().to_string(),
            timezone: user.timezone().to_string(),
            created_at: user.created_at(),
        }
    }

    fn to_domain(self) -> PortResult<User> {
        Ok(User::restore(&self.username, &self.timezone, self.created_at)?)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy)]
struct CoordinatesRecord {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum LocationRecord {
    GooglePlace {
        place_id: String,
        name: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        address: String,
        #[serde(default)]
        area: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<CoordinatesRecord>,
    },
    CustomText {
        name: String,
        #[serde(default)]
        area: String,
    },
}

impl LocationRecord {
    fn from_domain(location: &Location) -> Self {
        match location {
            Location::ExternalPlace(place) => LocationRecord::GooglePlace {
                place_id: place.place_id().to_string(),
                name: location.name().to_string(),
                address: place.address().to_string(),
                area: location.area().to_string(),
                coordinates: place.coordinates().map(|c| CoordinatesRecord {
                    latitude: c.latitude,
                    longitude: c.longitude,
                }),
            },
            Location::FreeformText(_) => LocationRecord::CustomText {
                name: location.name().to_string(),
                area: location.area().to_string(),
            },
        }
    }

    fn to_domain(self) -> PortResult<Location> {
        match self {
            LocationRecord::GooglePlace {
                place_id,
                name,
                address,
                area,
                coordinates,
            } => Ok(Location::external_place(
                &place_id,
                &name,
                &address,
                &area,
                coordinates.map(|c| Coordinates {
                    latitude: c.latitude,
                    longitude: c.longitude,
                }),
            )?),
            LocationRecord::CustomText { name, area } => Ok(Location::freeform(&name, &area)),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ActivityRecord {
    id: String,
    name: String,
    location: LocationRecord,
    start_time: String,
    duration_minutes: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    commentary: String,
    created_at: DateTime<Utc>,
}

impl ActivityRecord {
    fn from_domain(activity: &Activity) -> Self {
        Self {
            id: activity.id().to_string(),
            name: activity.name().to_string(),
            location: LocationRecord::from_domain(activity.location()),
            start_time: activity.start_time().to_string(),
            duration_minutes: activity.duration_minutes(),
            description: activity.description().to_string(),
            commentary: activity.commentary().to_string(),
            created_at: activity.created_at(),
        }
    }

    fn to_domain(self) -> PortResult<Activity> {
        let location = self.location.to_domain()?;
        Ok(Activity::restore(
            &self.id,
            &self.name,
            location,
            &self.start_time,
            self.duration_minutes,
            &self.description,
            &self.commentary,
            self.created_at,
        )?)
    }
}

#[derive(Serialize, Deserialize)]
struct DayRecord {
    id: String,
    title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    username: String,
    date: String,
    // Written for readers of the raw files; recomputed on load.
    #[serde(default)]
    areas: Vec<String>,
    #[serde(default)]
    activities: Vec<ActivityRecord>,
    #[serde(default)]
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DayRecord {
    fn from_domain(day: &Day) -> Self {
        Self {
            id: day.id().to_string(),
            title: day.title().to_string(),
            description: day.description().to_string(),
            username: day.username().to_string(),
            date: day.date().to_string(),
            areas: day.areas().to_vec(),
            activities: day.activities().iter().map(ActivityRecord::from_domain).collect(),
            is_deleted: day.is_deleted(),
            created_at: day.created_at(),
            updated_at: day.updated_at(),
        }
    }

    fn to_domain(self) -> PortResult<Day> {
        let activities = self
            .activities
            .into_iter()
            .map(ActivityRecord::to_domain)
            .collect::<PortResult<Vec<_>>>()?;
        Ok(Day::restore(DayParts {
            id: self.id,
            title: self.title,
            description: self.description,
            username: self.username,
            date: self.date,
            activities,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })?)
    }
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for FileStore {
    async fn save_user(&self, user: &User) -> PortResult<()> {
        let path = self.user_path(user.username())?;
        self.write_json(&path, &UserRecord::from_domain(user)).await?;
        debug!("Saved user {}", user.username());
        Ok(())
    }

    async fn load_user(&self, username: &str) -> PortResult<User> {
        let data = match fs::read(self.user_path(username)?).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(PortError::NotFound(format!("user not found: {}", username)))
            }
            Err(e) => return Err(storage_error("failed to read user file", e)),
        };
        let record: UserRecord = serde_json::from_slice(&data)
            .map_err(|e| PortError::Storage(format!("failed to decode user: {}", e)))?;
        record.to_domain()
    }

    async fn user_exists(&self, username: &str) -> bool {
        match self.user_path(username) {
            Ok(path) => fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn save_day(&self, day: &Day) -> PortResult<()> {
        let path = self.day_path(day.username(), day.id())?;
        self.write_json(&path, &DayRecord::from_domain(day)).await?;
        debug!("Saved perfect day {}/{}", day.username(), day.id());
        Ok(())
    }

    async fn load_day(&self, username: &str, id: &str) -> PortResult<Day> {
        self.read_day_file(&self.day_path(username, id)?)
            .await
            .map_err(|e| match e {
                PortError::NotFound(_) => {
                    PortError::NotFound(format!("perfect day not found: {}/{}", username, id))
                }
                other => other,
            })
    }

    async fn list_days_by_owner(&self, username: &str, include_deleted: bool) -> Vec<Day> {
        self.list_owner_dir(username, include_deleted).await
    }

    async fn list_all_days(&self, include_deleted: bool) -> Vec<Day> {
        let root = self.data_dir.join(DAYS_DIR);
        let mut entries = match fs::read_dir(&root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read {}: {}", root.display(), e);
                return Vec::new();
            }
        };

        let mut owners = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                owners.push(name.to_string());
            }
        }
        owners.sort();

        let mut days = Vec::new();
        for owner in owners {
            days.extend(self.list_owner_dir(&owner, include_deleted).await);
        }
        days
    }

    async fn delete_day(&self, username: &str, id: &str) -> PortResult<()> {
        let Ok(path) = self.day_path(username, id) else {
            return Ok(());
        };
        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("failed to delete perfect day file", e)),
        }
    }
}
