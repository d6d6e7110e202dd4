// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The session store.
//!
//! Holds the one piece of shared mutable state in the client. Writers are
//! the credential success path (`set_session`), profile refresh and
//! logout; everything else reads a snapshot or subscribes to changes.
//! Derived values (authenticated flag, roles) are computed from the
//! current state on every read.

use crate::error::AppError;
use crate::models::{AuthResponse, Identity, Profile, Role};
use crate::navigation::{Navigator, Route};
use crate::session::storage::SessionStorage;
use crate::session::token;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Canonical storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Canonical storage key for the serialized identity.
pub const USER_KEY: &str = "auth_user";
/// Keys written by earlier client revisions, still read on load.
pub const LEGACY_TOKEN_KEY: &str = "access_token";
pub const LEGACY_USER_KEY: &str = "current_user";
/// Never written by this client, but removed on logout.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

const TOKEN_KEYS: [&str; 2] = [TOKEN_KEY, LEGACY_TOKEN_KEY];
const USER_KEYS: [&str; 2] = [USER_KEY, LEGACY_USER_KEY];
const ALL_KEYS: [&str; 5] = [
    TOKEN_KEY,
    LEGACY_TOKEN_KEY,
    USER_KEY,
    LEGACY_USER_KEY,
    REFRESH_TOKEN_KEY,
];

/// Snapshot of the session. Token and identity are set together or not
/// at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
    identity: Option<Identity>,
}

impl SessionState {
    /// An authenticated state, for callers that build sessions by hand.
    pub fn authenticated(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            token: Some(token.into()),
            identity: Some(identity),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.identity.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn roles(&self) -> BTreeSet<Role> {
        match (&self.token, &self.identity) {
            (Some(_), Some(identity)) => identity.roles.clone(),
            _ => BTreeSet::new(),
        }
    }

    /// Role check; `"ADMIN"`, `"ROLE_ADMIN"` and `"admin"` are the same role.
    pub fn has_role(&self, role: &str) -> bool {
        Role::parse(role).is_some_and(|r| self.has(&r))
    }

    pub fn has(&self, role: &Role) -> bool {
        self.is_authenticated() && self.identity.as_ref().is_some_and(|i| i.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has(&Role::Admin)
    }

    pub fn is_programmer(&self) -> bool {
        self.has(&Role::Programador)
    }
}

/// Observable session container, shared as `Arc<SessionStore>`.
pub struct SessionStore {
    state: watch::Sender<SessionState>,
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionStore {
    /// Create the store and hydrate it from `storage`.
    ///
    /// Hydration happens here, synchronously and exactly once, so no guard
    /// or request can observe the store before it is resolved.
    pub fn new(storage: Arc<dyn SessionStorage>, navigator: Arc<dyn Navigator>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        let store = Self {
            state,
            storage,
            navigator,
        };
        store.hydrate();
        store
    }

    fn read_first(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|key| self.storage.get(key).filter(|v| !v.trim().is_empty()))
    }

    fn hydrate(&self) {
        let token = self.read_first(&TOKEN_KEYS);
        let user = self.read_first(&USER_KEYS);

        let (token, raw_user) = match (token, user) {
            (None, None) => return,
            (Some(token), Some(raw_user)) => (token, raw_user),
            _ => {
                tracing::warn!("Stored session is incomplete, clearing it");
                self.logout();
                return;
            }
        };

        let identity = match serde_json::from_str::<Identity>(&raw_user) {
            Ok(identity) if !identity.roles.is_empty() => identity,
            Ok(_) => {
                tracing::warn!("Stored identity has no roles, clearing session");
                self.logout();
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored identity is corrupted, clearing session");
                self.logout();
                return;
            }
        };

        if token::is_expired(&token, Utc::now()) {
            tracing::info!(user_id = identity.id, "Stored session has expired");
            self.logout();
            return;
        }

        tracing::info!(user_id = identity.id, "Session restored from storage");
        self.state.send_replace(SessionState {
            token: Some(token),
            identity: Some(identity),
        });
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Store the result of a successful credential exchange.
    ///
    /// The in-memory state is updated before this returns, so
    /// `is_authenticated()` is true immediately. The persisted copy is
    /// best effort: a storage failure is logged and the session stays
    /// valid for this process.
    pub fn set_session(&self, response: &AuthResponse) -> Result<Identity, AppError> {
        if response.token.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "authentication response has no token".to_string(),
            ));
        }

        let identity = Identity::from_auth(response);
        self.state.send_replace(SessionState {
            token: Some(response.token.clone()),
            identity: Some(identity.clone()),
        });

        self.persist_token(&response.token);
        self.persist_identity(&identity);

        tracing::info!(
            user_id = identity.id,
            roles = ?identity.roles,
            "Session established"
        );
        Ok(identity)
    }

    /// Refresh display data in place after a profile update.
    pub fn refresh_identity(&self, profile: &Profile) -> Option<Identity> {
        let mut updated = None;
        self.state.send_if_modified(|state| match state.identity.as_mut() {
            Some(identity) if identity.id == profile.user_id => {
                if profile.display_name.is_some() {
                    identity.display_name = profile.display_name.clone();
                }
                if profile.photo_url.is_some() {
                    identity.photo_url = profile.photo_url.clone();
                }
                updated = Some(identity.clone());
                true
            }
            _ => false,
        });

        if let Some(identity) = &updated {
            self.persist_identity(identity);
        }
        updated
    }

    /// End the session: clear memory and every persisted key, then send
    /// the user to the login route.
    pub fn logout(&self) {
        let previous = self.state.send_replace(SessionState::default());
        self.clear_storage();
        if let Some(identity) = previous.identity {
            tracing::info!(user_id = identity.id, "Logged out");
        }
        self.navigator.navigate(Route::Login);
    }

    /// Forced logout after the backend rejected `token_used`.
    ///
    /// Only tears the session down if it still holds that token, so any
    /// number of concurrent 401s for the same session produce exactly one
    /// teardown and one redirect, and a stale 401 cannot end a newer
    /// session. Returns whether a teardown happened.
    pub fn expire_session(&self, token_used: &str) -> bool {
        let expired = self.state.send_if_modified(|state| {
            if state.token.as_deref() == Some(token_used) {
                *state = SessionState::default();
                true
            } else {
                false
            }
        });

        if expired {
            self.clear_storage();
            tracing::warn!("Session rejected by backend, logged out");
            self.navigator.navigate(Route::Login);
        }
        expired
    }

    /// A protected request went out without a token and was refused.
    /// Sends the user to login unless a session was established meanwhile.
    pub fn require_login(&self) -> bool {
        if self.is_authenticated() {
            return false;
        }
        tracing::info!("Protected request refused without a session");
        self.navigator.navigate(Route::Login);
        true
    }

    fn persist_token(&self, token: &str) {
        for key in TOKEN_KEYS {
            if let Err(e) = self.storage.set(key, token) {
                tracing::warn!(key, error = %e, "Failed to persist token");
            }
        }
    }

    fn persist_identity(&self, identity: &Identity) {
        let json = match serde_json::to_string(identity) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode identity");
                return;
            }
        };
        for key in USER_KEYS {
            if let Err(e) = self.storage.set(key, &json) {
                tracing::warn!(key, error = %e, "Failed to persist identity");
            }
        }
    }

    fn clear_storage(&self) {
        for key in ALL_KEYS {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(key, error = %e, "Failed to clear stored session key");
            }
        }
    }

    // ─── Reads ───────────────────────────────────────────────────

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity.clone()
    }

    pub fn roles(&self) -> BTreeSet<Role> {
        self.state.borrow().roles()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.state.borrow().has_role(role)
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_programmer(&self) -> bool {
        self.state.borrow().is_programmer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::session::MemoryStorage;

    fn auth_response(roles: &[&str]) -> AuthResponse {
        AuthResponse {
            token: "token-1".to_string(),
            user_id: 42,
            username: "maria".to_string(),
            email: "maria@example.com".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            display_name: None,
            photo_url: None,
        }
    }

    fn store() -> (SessionStore, Arc<MemoryStorage>, Arc<RecordingNavigator>) {
        let storage = Arc::new(MemoryStorage::new());
        let nav = Arc::new(RecordingNavigator::new());
        (SessionStore::new(storage.clone(), nav.clone()), storage, nav)
    }

    #[test]
    fn test_set_session_is_immediately_visible() {
        let (store, storage, _) = store();
        assert!(!store.is_authenticated());

        store.set_session(&auth_response(&["PROGRAMADOR"])).unwrap();

        assert!(store.is_authenticated());
        assert!(store.has_role("ROLE_PROGRAMADOR"));
        assert!(store.has_role("programmer"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("token-1"));
        assert_eq!(storage.get(LEGACY_TOKEN_KEY).as_deref(), Some("token-1"));
        assert_eq!(storage.get(USER_KEY), storage.get(LEGACY_USER_KEY));
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let (store, storage, _) = store();
        let mut response = auth_response(&["USER"]);
        response.token = "  ".to_string();
        assert!(store.set_session(&response).is_err());
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_refresh_identity_updates_display_data() {
        let (store, storage, _) = store();
        store.set_session(&auth_response(&["USER"])).unwrap();

        let profile = Profile {
            id: 1,
            user_id: 42,
            display_name: Some("María".to_string()),
            specialty: None,
            description: None,
            skills: vec![],
            photo_url: None,
        };
        let updated = store.refresh_identity(&profile).unwrap();
        assert_eq!(updated.name(), "María");
        assert!(storage.get(USER_KEY).unwrap().contains("María"));

        let other = Profile {
            user_id: 7,
            ..profile
        };
        assert!(store.refresh_identity(&other).is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_logout() {
        let (store, _, _) = store();
        store.set_session(&auth_response(&["USER"])).unwrap();
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_authenticated());

        store.logout();

        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_authenticated());
    }

    #[test]
    fn test_expire_session_ignores_stale_token() {
        let (store, _, nav) = store();
        store.set_session(&auth_response(&["USER"])).unwrap();

        assert!(!store.expire_session("some-older-token"));
        assert!(store.is_authenticated());

        assert!(store.expire_session("token-1"));
        assert!(!store.expire_session("token-1"));
        assert_eq!(nav.count(Route::Login), 1);
    }
}
