//! Authentication state gating the protected views.

use std::sync::Arc;

use crate::api::dto::User;
use crate::error::{AppError, AppResult};
use crate::routes::{Route, Router};
use crate::session::store::{CredentialStore, TOKEN_KEY, USER_KEY};

/// An authenticated admin and the bearer token issued for them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Outcome of entering a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Hydration has not finished; show a neutral placeholder
    Loading,
    /// Not allowed here; the guard already navigated to this route
    Redirect(Route),
    Granted,
}

/// Process-wide authentication state derived from the credential store.
///
/// Starts in the loading state. [`initialize`](Self::initialize) hydrates
/// it from the store without any network call.
pub struct SessionGuard {
    store: Arc<dyn CredentialStore>,
    session: Option<Session>,
    loading: bool,
    router: Router,
}

impl SessionGuard {
    pub fn new(store: Arc<dyn CredentialStore>, start: Route) -> Self {
        Self {
            store,
            session: None,
            loading: true,
            router: Router::new(start),
        }
    }

    /// Reads the persisted credential and settles the loading state.
    ///
    /// A missing or malformed credential leaves the guard unauthenticated
    /// and sends the user to the login view. Returns whether a session was
    /// restored.
    pub fn initialize(&mut self) -> bool {
        self.session = self.read_persisted();
        self.loading = false;

        match &self.session {
            Some(session) => {
                tracing::debug!(user = %session.user.email, "Session restored");
                true
            }
            None => {
                if self.router.current() != Route::Login {
                    self.router.navigate(Route::Login);
                }
                false
            }
        }
    }

    fn read_persisted(&self) -> Option<Session> {
        let token = match self.store.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => token.trim().to_string(),
            Ok(Some(_)) => {
                tracing::warn!("Stored token is empty, ignoring persisted session");
                return None;
            }
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored token, ignoring persisted session");
                return None;
            }
        };

        let raw_user = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::warn!("Token stored without a user, ignoring persisted session");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored user, ignoring persisted session");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is malformed, ignoring persisted session");
                None
            }
        }
    }

    /// Persists the credential, opens the session and shows the dashboard.
    ///
    /// Nothing changes when persisting fails.
    pub fn login(&mut self, token: impl Into<String>, user: User) -> AppResult<()> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AppError::validation("token", "Access token is empty"));
        }

        let user_json = serde_json::to_string(&user).map_err(|e| AppError::Internal {
            source: e.into(),
        })?;

        self.store.set(TOKEN_KEY, &token)?;
        if let Err(e) = self.store.set(USER_KEY, &user_json) {
            if let Err(rollback) = self.store.remove(TOKEN_KEY) {
                tracing::warn!(error = %rollback, "Failed to roll back stored token");
            }
            return Err(e);
        }

        tracing::info!(user = %user.email, "Signed in");
        self.session = Some(Session { token, user });
        self.loading = false;
        self.router.navigate(Route::DEFAULT);
        Ok(())
    }

    /// Clears the credential and the session and shows the login view.
    ///
    /// Storage failures are logged; the in-memory session is always cleared.
    pub fn logout(&mut self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "Failed to clear stored credential");
            }
        }
        if let Some(session) = self.session.take() {
            tracing::info!(user = %session.user.email, "Signed out");
        }
        self.loading = false;
        self.router.navigate(Route::Login);
    }

    /// Decides whether `route` may be shown, navigating accordingly.
    pub fn check_access(&mut self, route: Route) -> AccessDecision {
        if self.loading {
            return AccessDecision::Loading;
        }

        if route.is_protected() && self.session.is_none() {
            tracing::debug!(route = %route, "Not authenticated, redirecting to login");
            self.router.navigate(Route::Login);
            return AccessDecision::Redirect(Route::Login);
        }

        self.router.navigate(route);
        AccessDecision::Granted
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}
