//! services/perfect_day/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use perfect_day_core::ports::{PlacesService, StorageService};
use perfect_day_core::sessions::SessionStore;
use std::sync::Arc;
use std::time::Instant;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub sessions: Arc<SessionStore>,
    pub places: Arc<dyn PlacesService>,
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    /// Wires a session store on top of `storage` using the configured TTL.
    pub fn new(
        storage: Arc<dyn StorageService>,
        places: Arc<dyn PlacesService>,
        config: Arc<Config>,
    ) -> Self {
        let sessions = Arc::new(SessionStore::with_ttl(
            storage.clone(),
            chrono::Duration::hours(config.session_ttl_hours),
        ));
        Self {
            storage,
            sessions,
            places,
            config,
            started_at: Instant::now(),
        }
    }
}
