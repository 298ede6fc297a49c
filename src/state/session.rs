use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::storage::{KeyValueStorage, StorageError, FAVORITE_POSTS_KEY, TOKEN_KEY, USER_KEY};
use super::token::normalize_token;
use crate::models::{LoginResponse, LogoutPayload, UserProfile, UserRole};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to persist session: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to encode user profile: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What the UI reads to decide who is signed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub token: String,
    pub current_user: Option<UserProfile>,
    /// Entries of `favoritePostsList`, kept as the backend sent them.
    pub favorite_posts: Vec<Value>,
}

impl SessionState {
    pub fn role(&self) -> Option<UserRole> {
        self.current_user.as_ref().map(|u| u.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(UserRole::Admin)
    }
}

/// A single storage mutation made while persisting a login.
enum StorageWrite<'a> {
    Set(&'static str, &'a str),
    Remove(&'static str),
}

impl StorageWrite<'_> {
    fn key(&self) -> &'static str {
        match self {
            StorageWrite::Set(key, _) | StorageWrite::Remove(key) => *key,
        }
    }
}

/// Session state plus the storage it is persisted to.
///
/// Only [`SessionStore::login`] and [`SessionStore::logout`] change it.
pub struct SessionStore {
    state: SessionState,
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    /// Rebuild the session from persisted storage.
    ///
    /// Only a stored user that is not a JSON object is treated as no user.
    pub fn initialize(storage: Arc<dyn KeyValueStorage>) -> Self {
        let current_user = storage
            .get(USER_KEY)
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("Ignoring malformed persisted user: {}", e);
                    None
                }
            });

        let favorite_posts = storage
            .get(FAVORITE_POSTS_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(posts) => Some(posts),
                Err(e) => {
                    tracing::warn!("Ignoring malformed favorite posts list: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let state = match current_user {
            Some(user) => {
                let token = storage
                    .get(TOKEN_KEY)
                    .map(|raw| normalize_token(&raw).to_string())
                    .unwrap_or_default();
                tracing::info!("Restored session for role {:?}", user.role);
                SessionState {
                    is_authenticated: true,
                    token,
                    current_user: Some(user),
                    favorite_posts,
                }
            }
            None => SessionState {
                favorite_posts,
                ..SessionState::default()
            },
        };

        SessionStore { state, storage }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.state.current_user.as_ref()
    }

    /// Record a successful login, replacing the whole session.
    ///
    /// The previous session's favorites are dropped. If any storage write
    /// fails, the writes already made are rolled back and neither storage
    /// nor the in-memory state changes.
    pub fn login(&mut self, response: LoginResponse) -> Result<(), SessionError> {
        let LoginResponse { token, user } = response;
        let token = normalize_token(&token).to_string();
        let encoded = serde_json::to_string(&user)?;

        self.apply_all(&[
            StorageWrite::Set(TOKEN_KEY, &token),
            StorageWrite::Set(USER_KEY, &encoded),
            StorageWrite::Remove(FAVORITE_POSTS_KEY),
        ])?;

        tracing::info!("User logged in with role {:?}", user.role);

        self.state = SessionState {
            is_authenticated: true,
            token,
            current_user: Some(user),
            favorite_posts: Vec::new(),
        };
        Ok(())
    }

    /// Return to the anonymous state and forget the persisted session.
    pub fn logout(&mut self, payload: LogoutPayload) {
        if payload.user.is_some() {
            tracing::debug!("Logout payload carried a user; ignoring it");
        }

        for key in [USER_KEY, TOKEN_KEY, FAVORITE_POSTS_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!("Failed to clear persisted {}: {}", key, e);
            }
        }

        self.state = SessionState::default();
        tracing::info!("User logged out");
    }

    fn apply_all(&self, writes: &[StorageWrite<'_>]) -> Result<(), StorageError> {
        let mut applied: Vec<(&'static str, Option<String>)> = Vec::with_capacity(writes.len());

        for write in writes {
            let key = write.key();
            let previous = self.storage.get(key);
            let result = match write {
                StorageWrite::Set(key, value) => self.storage.set(key, value),
                StorageWrite::Remove(key) => self.storage.remove(key),
            };

            if let Err(e) = result {
                self.roll_back(applied);
                return Err(e);
            }
            applied.push((key, previous));
        }

        Ok(())
    }

    fn roll_back(&self, applied: Vec<(&'static str, Option<String>)>) {
        for (key, previous) in applied.into_iter().rev() {
            let result = match previous {
                Some(value) => self.storage.set(key, &value),
                None => self.storage.remove(key),
            };
            if let Err(e) = result {
                tracing::warn!("Failed to restore persisted {}: {}", key, e);
            }
        }
    }
}
