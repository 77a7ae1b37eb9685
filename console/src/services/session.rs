//! # Session Store
//!
//! Holds the bearer token and the current user's profile.
//!
//! The token is the single source of truth for "authenticated". The profile
//! is display data: losing it never blocks navigation.
//!
//! ## Lifecycle
//!
//! ```text
//! login(username, password) ──▶ token persisted ──▶ profile (best effort)
//! restore()                 ──▶ persisted token ──▶ profile (strict, failure = logout)
//! logout() / HTTP 401       ──▶ token + profile + persisted token cleared
//! ```

use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::storage::{MemoryTokenStorage, TokenStorage};
use parking_lot::RwLock;
use shared::User;
use std::sync::Arc;

/// In-memory session contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Shared handle to the session. Cloning shares the same session.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<RwLock<Session>>,
    storage: Arc<dyn TokenStorage>,
}

impl SessionHandle {
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Session::default())),
            storage,
        }
    }

    /// Session that forgets its token when the process exits
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.inner.read().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.read().token.is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.inner.read().user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.inner.read().clone()
    }

    /// Adopt a freshly issued token and persist it.
    ///
    /// The in-memory token is set even when persisting fails; the session then
    /// simply does not survive a restart.
    pub fn set_token(&self, token: String) -> Result<()> {
        self.inner.write().token = Some(token.clone());
        self.storage.save(&token)
    }

    pub fn set_user(&self, user: Option<User>) {
        self.inner.write().user = user;
    }

    /// Load the persisted token into memory, returning it.
    pub fn adopt_persisted(&self) -> Result<Option<String>> {
        let token = self.storage.load()?;
        self.inner.write().token = token.clone();
        Ok(token)
    }

    /// Tear the session down: memory first, then persisted storage.
    ///
    /// Idempotent. A storage failure is logged, the in-memory session is
    /// cleared regardless.
    pub fn clear(&self) {
        {
            let mut session = self.inner.write();
            session.token = None;
            session.user = None;
        }
        if let Err(e) = self.storage.clear() {
            tracing::error!(error = %e, "Failed to clear persisted token");
        }
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let session = self.inner.read();
        f.debug_struct("SessionHandle")
            .field("authenticated", &session.token.is_some())
            .field("user", &session.user.as_ref().map(|u| u.username.as_str()))
            .finish()
    }
}

/// Log in and persist the token, then load the profile.
///
/// Returns the loaded profile, or `None` when only the profile fetch failed
/// (the session stays valid in that case).
#[tracing::instrument(skip(api, password), fields(username = %username))]
pub async fn login(api: &dyn ApiService, username: &str, password: &str) -> Result<Option<User>> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::InvalidInput(
            "Username and password required".to_string(),
        ));
    }

    tracing::info!("Attempting login");
    let response = api.login(username, password).await?;

    let token = match response.token() {
        Some(token) => token.to_string(),
        None => {
            tracing::error!("Login succeeded without an access token");
            return Err(AppError::InvalidLoginResponse);
        }
    };

    if let Err(e) = api.session().set_token(token) {
        tracing::warn!(error = %e, "Token could not be persisted; session will not survive restart");
    }
    tracing::info!("Token stored");

    Ok(load_current_user(api).await)
}

/// Best-effort profile load used during normal operation.
///
/// Failures are logged only: an expired session is already handled by the
/// 401 path of the API client.
pub async fn load_current_user(api: &dyn ApiService) -> Option<User> {
    match api.current_user().await {
        Ok(user) => {
            tracing::info!(user = %user.username, roles = ?user.role_names(), "Current user loaded");
            api.session().set_user(Some(user.clone()));
            Some(user)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load current user");
            None
        }
    }
}

/// Restore a session from the persisted token.
///
/// Returns `Ok(true)` when a persisted token was found and its profile
/// loaded, `Ok(false)` when there was nothing to restore. Any failure while
/// loading the profile invalidates the session.
#[tracing::instrument(skip(api))]
pub async fn restore(api: &dyn ApiService) -> Result<bool> {
    let session = api.session();

    let token = match session.adopt_persisted() {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Persisted token unreadable");
            session.clear();
            return Err(e);
        }
    };

    if token.is_none() {
        tracing::info!("No persisted token, login required");
        return Ok(false);
    }

    tracing::info!("Persisted token found, restoring session");
    match api.current_user().await {
        Ok(user) => {
            tracing::info!(user = %user.username, "Session restored");
            session.set_user(Some(user));
            Ok(true)
        }
        Err(e) => {
            tracing::error!(error = %e, "Automatic login failed");
            session.clear();
            Err(e)
        }
    }
}

/// Log out locally. Synchronous and idempotent.
pub fn logout(session: &SessionHandle) {
    tracing::info!("Logging out");
    session.clear();
}
