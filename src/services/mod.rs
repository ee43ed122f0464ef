//! Application services used by the views.
//!
//! Services wrap the backend client and the credential store and carry
//! the rules the views rely on.

mod auth_service;
mod dashboard_service;
mod settings_service;

pub use auth_service::{ACCESS_DENIED_MESSAGE, AuthService};
pub use dashboard_service::{
    DASHBOARD_UNAVAILABLE_MESSAGE, DashboardService, DashboardSummary, StatCard,
};
pub use settings_service::{
    FinancialSettings, GeneralSettings, NotificationSettings, PlatformSettings, SETTING_KEYS,
    SettingsService, SettingsTab,
};

use std::sync::Arc;

use crate::api::AdminApi;
use crate::session::CredentialStore;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub dashboard: DashboardService,
    pub settings: SettingsService,
}

impl Services {
    pub fn new(api: Arc<dyn AdminApi>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            auth: AuthService::new(Arc::clone(&api)),
            dashboard: DashboardService::new(api),
            settings: SettingsService::new(store),
        }
    }
}
