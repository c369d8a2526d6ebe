//! crates/perfect_day_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like the file store
//! or the places provider.

use async_trait::async_trait;
use crate::domain::{Day, PlaceResult, User, ValidationError};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Invalid session")]
    InvalidSession,
    #[error("Session expired")]
    ExpiredSession,
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StorageService: Send + Sync {
    // --- User Management ---
    async fn save_user(&self, user: &User) -> PortResult<()>;

    async fn load_user(&self, username: &str) -> PortResult<User>;

    async fn user_exists(&self, username: &str) -> bool;

    // --- Day Management ---
    /// Overwrites any stored day with the same owner and id.
    async fn save_day(&self, day: &Day) -> PortResult<()>;

    async fn load_day(&self, username: &str, id: &str) -> PortResult<Day>;

    /// Every day of one owner. An unknown owner yields an empty list.
    async fn list_days_by_owner(&self, username: &str, include_deleted: bool) -> Vec<Day>;

    /// Every day of every owner. A missing storage root yields an empty list.
    async fn list_all_days(&self, include_deleted: bool) -> Vec<Day>;

    /// Removes the stored file. Deleting an absent day is not an error.
    async fn delete_day(&self, username: &str, id: &str) -> PortResult<()>;
}

#[async_trait]
pub trait PlacesService: Send + Sync {
    /// Whether a provider is configured at all.
    fn is_enabled(&self) -> bool;

    /// Free-text place search.
    async fn search_places(&self, query: &str) -> PortResult<Vec<PlaceResult>>;

    async fn place_details(&self, place_id: &str) -> PortResult<PlaceResult>;
}
