//! crates/perfect_day_core/src/sessions.rs
//!
//! In-memory login sessions. The store is created once and handed to
//! whatever authenticates requests; the map inside it is guarded by a mutex
//! so concurrent logins, validations and logouts are serialized. Nothing is
//! persisted, so a restart invalidates every session.

use crate::domain::{AuthSession, User};
use crate::ports::{PortError, PortResult, StorageService};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

pub struct SessionStore {
    storage: Arc<dyn StorageService>,
    ttl: Duration,
    sessions: Mutex<HashMap<String, AuthSession>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn StorageService>) -> Self {
        Self::with_ttl(storage, Duration::hours(DEFAULT_SESSION_TTL_HOURS))
    }

    pub fn with_ttl(storage: Arc<dyn StorageService>, ttl: Duration) -> Self {
        Self {
            storage,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Opens a fresh session for an existing user.
    pub async fn login(&self, username: &str) -> PortResult<(User, AuthSession)> {
        let user = self.storage.load_user(username).await.map_err(|e| match e {
            PortError::NotFound(_) => PortError::NotFound(format!("user not found: {}", username)),
            other => other,
        })?;

        let session = AuthSession {
            token: Uuid::new_v4().simple().to_string(),
            username: user.username().to_string(),
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions
            .lock()
            .await
            .insert(session.token.clone(), session.clone());
        debug!("Opened session for {}", session.username);
        Ok((user, session))
    }

    /// Resolves a token to its user, evicting it if it has expired.
    pub async fn validate(&self, token: &str) -> PortResult<User> {
        let username = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get(token).ok_or(PortError::InvalidSession)?;
            if Utc::now() > session.expires_at {
                sessions.remove(token);
                return Err(PortError::ExpiredSession);
            }
            session.username.clone()
        };

        self.storage.load_user(&username).await
    }

    /// Drops the session if present.
    pub async fn logout(&self, token: &str) {
        self.sessions.lock().await.remove(token);
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Day;
    use async_trait::async_trait;

    struct UsersOnly {
        users: Vec<User>,
    }

    #[async_trait]
    impl StorageService for UsersOnly {
        async fn save_user(&self, _user: &User) -> PortResult<()> {
            Ok(())
        }

        async fn load_user(&self, username: &str) -> PortResult<User> {
            self.users
                .iter()
                .find(|u| u.username() == username)
                .cloned()
                .ok_or_else(|| PortError::NotFound(username.to_string()))
        }

        async fn user_exists(&self, username: &str) -> bool {
            self.users.iter().any(|u| u.username() == username)
        }

        async fn save_day(&self, _day: &Day) -> PortResult<()> {
            Ok(())
        }

        async fn load_day(&self, username: &str, id: &str) -> PortResult<Day> {
            Err(PortError::NotFound(format!("{}/{}", username, id)))
        }

        async fn list_days_by_owner(&self, _username: &str, _include_deleted: bool) -> Vec<Day> {
            Vec::new()
        }

        async fn list_all_days(&self, _include_deleted: bool) -> Vec<Day> {
            Vec::new()
        }

        async fn delete_day(&self, _username: &str, _id: &str) -> PortResult<()> {
            Ok(())
        }
    }

    fn storage() -> Arc<dyn StorageService> {
        Arc::new(UsersOnly {
            users: vec![User::new("alice", "Asia/Tokyo").unwrap()],
        })
    }

    #[tokio::test]
    async fn login_then_validate() {
        let store = SessionStore::new(storage());
        let (user, session) = store.login("alice").await.unwrap();
        assert_eq!(user.username(), "alice");
        assert_eq!(session.username, "alice");
        assert!(session.expires_at > Utc::now() + Duration::hours(23));

        let resolved = store.validate(&session.token).await.unwrap();
        assert_eq!(resolved.timezone(), "Asia/Tokyo");
    }

    #[tokio::test]
    async fn tokens_are_unique() {
        let store = SessionStore::new(storage());
        let (_, first) = store.login("alice").await.unwrap();
        let (_, second) = store.login("alice").await.unwrap();
        assert_ne!(first.token, second.token);
        assert_eq!(store.active_sessions().await, 2);
    }

    #[tokio::test]
    async fn unknown_user_cannot_login() {
        let store = SessionStore::new(storage());
        assert!(matches!(store.login("mallory").await, Err(PortError::NotFound(_))));
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let store = SessionStore::new(storage());
        assert!(matches!(store.validate("nope").await, Err(PortError::InvalidSession)));
    }

    #[tokio::test]
    async fn expired_session_is_evicted() {
        let store = SessionStore::with_ttl(storage(), Duration::seconds(-1));
        let (_, session) = store.login("alice").await.unwrap();
        assert!(matches!(
            store.validate(&session.token).await,
            Err(PortError::ExpiredSession)
        ));
        assert_eq!(store.active_sessions().await, 0);
        assert!(matches!(
            store.validate(&session.token).await,
            Err(PortError::InvalidSession)
        ));
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = SessionStore::new(storage());
        let (_, session) = store.login("alice").await.unwrap();
        store.logout(&session.token).await;
        store.logout(&session.token).await;
        assert!(matches!(
            store.validate(&session.token).await,
            Err(PortError::InvalidSession)
        ));
    }
}
