//! Shared client state.
//!
//! Holds the backend client, the credential store, the session guard and
//! the services built on top of them.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::dto::User;
use crate::api::{AdminApi, HttpAdminApi};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};
use crate::list::{FetchState, ListResource, SharedListController};
use crate::routes::Route;
use crate::services::Services;
use crate::session::{AccessDecision, CredentialStore, FileCredentialStore, SessionGuard};

/// Shown when a protected view is opened without a session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Sessão expirada. Faça login novamente.";

/// Everything a view needs, shared behind `Arc`s.
pub struct AppContext {
    settings: Settings,
    api: Arc<dyn AdminApi>,
    store: Arc<dyn CredentialStore>,
    guard: Mutex<SessionGuard>,
    services: Services,
}

impl AppContext {
    /// Builds the HTTP client and the file store described by `settings`.
    pub fn new(settings: Settings) -> AppResult<Self> {
        let api: Arc<dyn AdminApi> = Arc::new(HttpAdminApi::new(&settings.api)?);
        let store: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(settings.session.storage_path()));
        Ok(Self::with_parts(settings, api, store))
    }

    /// Hydrates the session from `store` and hands its token to `api`.
    pub fn with_parts(
        settings: Settings,
        api: Arc<dyn AdminApi>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let mut guard = SessionGuard::new(Arc::clone(&store), Route::DEFAULT);
        guard.initialize();
        api.set_access_token(guard.token().map(str::to_string));

        let services = Services::new(Arc::clone(&api), Arc::clone(&store));
        Self {
            settings,
            api,
            store,
            guard: Mutex::new(guard),
            services,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    fn guard(&self) -> MutexGuard<'_, SessionGuard> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` on the session guard under the lock.
    pub fn with_guard<T>(&self, f: impl FnOnce(&mut SessionGuard) -> T) -> T {
        f(&mut self.guard())
    }

    pub fn is_authenticated(&self) -> bool {
        self.guard().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.guard().current_user().cloned()
    }

    pub fn current_route(&self) -> Route {
        self.guard().router().current()
    }

    /// Signs in an admin and persists the credential.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let response = self.services.auth.authenticate(email, password).await?;
        let token = response.tokens.access_token;
        let user = response.user;

        self.guard().login(token.clone(), user.clone())?;
        self.api.set_access_token(Some(token));
        Ok(user)
    }

    pub fn logout(&self) {
        self.guard().logout();
        self.api.set_access_token(None);
    }

    /// Enters `route`, redirecting to the login view without a session.
    pub fn enter(&self, route: Route) -> AppResult<()> {
        match self.guard().check_access(route) {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Loading | AccessDecision::Redirect(_) => Err(AppError::Unauthorized {
                message: LOGIN_REQUIRED_MESSAGE.to_string(),
            }),
        }
    }

    /// Enters `route` and runs `fetch`, ending the session on a 401.
    pub async fn protected<T, F>(&self, route: Route, fetch: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        self.enter(route)?;
        let result = fetch.await;
        if let Err(e) = &result
            && e.is_unauthorized()
        {
            tracing::warn!(route = %route, "Credential rejected by the backend, signing out");
            self.logout();
        }
        result
    }

    /// New list controller using the configured page size.
    pub fn list_controller<R: ListResource>(&self) -> SharedListController<R> {
        SharedListController::new(Arc::clone(&self.api), self.settings.listing.page_size)
    }

    /// Ends the session when a list fetch was rejected with a 401.
    ///
    /// Returns whether the session was ended.
    pub fn observe<T>(&self, state: &FetchState<T>) -> bool {
        if state.is_unauthorized() {
            tracing::warn!("Credential rejected by the backend, signing out");
            self.logout();
            return true;
        }
        false
    }
}
