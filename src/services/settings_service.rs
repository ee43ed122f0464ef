//! Platform settings kept on this machine.
//!
//! The backend has no endpoint for these, so the document is stored as JSON
//! in the credential store under `platform_settings`.

use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::session::{CredentialStore, SETTINGS_KEY};

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\d{2}\) \d{4,5}-\d{4}$").unwrap_or_else(|e| panic!("invalid phone pattern: {e}"))
});

static CURRENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{3}$").unwrap_or_else(|e| panic!("invalid currency pattern: {e}"))
});

/// Tabs of the settings view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Financial,
    Notifications,
    Security,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::General,
        SettingsTab::Financial,
        SettingsTab::Notifications,
        SettingsTab::Security,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SettingsTab::General => "general",
            SettingsTab::Financial => "financial",
            SettingsTab::Notifications => "notifications",
            SettingsTab::Security => "security",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsTab::General => "Geral",
            SettingsTab::Financial => "Financeiro",
            SettingsTab::Notifications => "Notificações",
            SettingsTab::Security => "Segurança",
        }
    }
}

impl FromStr for SettingsTab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.id() == s.trim().to_lowercase())
            .ok_or_else(|| {
                AppError::validation(
                    "tab",
                    format!(
                        "Invalid tab '{}'. Valid tabs are: general, financial, notifications, security",
                        s
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    #[validate(length(min = 1, max = 80, message = "Informe o nome da plataforma"))]
    pub platform_name: String,
    #[validate(email(message = "E-mail de suporte inválido"))]
    pub support_email: String,
    #[validate(regex(path = *PHONE_PATTERN, message = "Telefone deve seguir o formato (11) 99999-9999"))]
    pub support_phone: String,
    pub auto_approve_professionals: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            platform_name: "Marcenaria App".to_string(),
            support_email: "suporte@marcenariapp.com.br".to_string(),
            support_phone: "(11) 99999-9999".to_string(),
            auto_approve_professionals: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialSettings {
    #[validate(range(min = 0.0, max = 100.0, message = "A taxa deve estar entre 0 e 100"))]
    pub platform_fee_percentage: f64,
    #[validate(range(min = 0.0, message = "O saque mínimo não pode ser negativo"))]
    pub min_withdrawal_amount: f64,
    #[validate(regex(path = *CURRENCY_PATTERN, message = "A moeda deve ter 3 letras"))]
    pub currency: String,
}

impl Default for FinancialSettings {
    fn default() -> Self {
        Self {
            platform_fee_percentage: 15.0,
            min_withdrawal_amount: 50.0,
            currency: "BRL".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_on_new_user: bool,
    pub email_on_new_service: bool,
    pub email_on_dispute: bool,
    pub weekly_report: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_on_new_user: true,
            email_on_new_service: true,
            email_on_dispute: true,
            weekly_report: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub general: GeneralSettings,
    pub financial: FinancialSettings,
    pub notifications: NotificationSettings,
}

/// Every key accepted by [`PlatformSettings::set`], as `tab.field`.
pub const SETTING_KEYS: &[&str] = &[
    "general.platform_name",
    "general.support_email",
    "general.support_phone",
    "general.auto_approve_professionals",
    "financial.platform_fee_percentage",
    "financial.min_withdrawal_amount",
    "financial.currency",
    "notifications.email_on_new_user",
    "notifications.email_on_new_service",
    "notifications.email_on_dispute",
    "notifications.weekly_report",
];

fn parse_bool(key: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "sim" => Ok(true),
        "false" | "no" | "off" | "0" | "nao" | "não" => Ok(false),
        _ => Err(AppError::validation(
            key,
            format!("Expected true or false, got '{}'", value),
        )),
    }
}

fn parse_number(key: &str, value: &str) -> AppResult<f64> {
    value
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AppError::validation(key, format!("Expected a number, got '{}'", value)))
}

impl PlatformSettings {
    /// Validates every tab, reporting the first failing field.
    pub fn validate_all(&self) -> AppResult<()> {
        self.general.validate()?;
        self.financial.validate()?;
        Ok(())
    }

    /// Sets one field from its text form. Does not validate.
    pub fn set(&mut self, key: &str, value: &str) -> AppResult<()> {
        match key {
            "general.platform_name" => self.general.platform_name = value.trim().to_string(),
            "general.support_email" => self.general.support_email = value.trim().to_string(),
            "general.support_phone" => self.general.support_phone = value.trim().to_string(),
            "general.auto_approve_professionals" => {
                self.general.auto_approve_professionals = parse_bool(key, value)?
            }
            "financial.platform_fee_percentage" => {
                self.financial.platform_fee_percentage = parse_number(key, value)?
            }
            "financial.min_withdrawal_amount" => {
                self.financial.min_withdrawal_amount = parse_number(key, value)?
            }
            "financial.currency" => self.financial.currency = value.trim().to_uppercase(),
            "notifications.email_on_new_user" => {
                self.notifications.email_on_new_user = parse_bool(key, value)?
            }
            "notifications.email_on_new_service" => {
                self.notifications.email_on_new_service = parse_bool(key, value)?
            }
            "notifications.email_on_dispute" => {
                self.notifications.email_on_dispute = parse_bool(key, value)?
            }
            "notifications.weekly_report" => {
                self.notifications.weekly_report = parse_bool(key, value)?
            }
            _ => {
                return Err(AppError::validation(
                    "key",
                    format!(
                        "Unknown setting '{}'. Valid keys are: {}",
                        key,
                        SETTING_KEYS.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Loads, edits and persists [`PlatformSettings`].
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn CredentialStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Stored settings, or the defaults when none are stored.
    ///
    /// A corrupt document is logged and replaced by the defaults.
    pub fn load(&self) -> AppResult<PlatformSettings> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            return Ok(PlatformSettings::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(error = %e, "Stored platform settings are malformed, using defaults");
                Ok(PlatformSettings::default())
            }
        }
    }

    pub fn save(&self, settings: &PlatformSettings) -> AppResult<()> {
        settings.validate_all()?;
        let json = serde_json::to_string_pretty(settings).map_err(|e| AppError::Internal {
            source: e.into(),
        })?;
        self.store.set(SETTINGS_KEY, &json)?;
        tracing::info!("Platform settings saved");
        Ok(())
    }

    /// Updates one field and saves; nothing is stored when validation fails.
    pub fn update(&self, key: &str, value: &str) -> AppResult<PlatformSettings> {
        let mut settings = self.load()?;
        settings.set(key, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Drops the stored document and returns the defaults.
    pub fn reset(&self) -> AppResult<PlatformSettings> {
        self.store.remove(SETTINGS_KEY)?;
        tracing::info!("Platform settings reset to defaults");
        Ok(PlatformSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryCredentialStore;

    fn service() -> (SettingsService, Arc<MemoryCredentialStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        (SettingsService::new(store.clone()), store)
    }

    #[test]
    fn test_defaults() {
        let settings = PlatformSettings::default();
        assert_eq!(settings.general.platform_name, "Marcenaria App");
        assert_eq!(settings.general.support_phone, "(11) 99999-9999");
        assert!(!settings.general.auto_approve_professionals);
        assert_eq!(settings.financial.platform_fee_percentage, 15.0);
        assert_eq!(settings.financial.min_withdrawal_amount, 50.0);
        assert_eq!(settings.financial.currency, "BRL");
        assert!(settings.notifications.email_on_dispute);
        assert!(!settings.notifications.weekly_report);
        assert!(settings.validate_all().is_ok());
    }

    #[test]
    fn test_load_without_document_returns_defaults() {
        let (service, _) = service();
        assert_eq!(service.load().unwrap(), PlatformSettings::default());
    }

    #[test]
    fn test_update_persists_json() {
        let (service, store) = service();
        let updated = service
            .update("financial.platform_fee_percentage", "12,5")
            .unwrap();
        assert_eq!(updated.financial.platform_fee_percentage, 12.5);

        let raw = store.get(SETTINGS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["financial"]["platformFeePercentage"], 12.5);
        assert_eq!(service.load().unwrap(), updated);
    }

    #[test]
    fn test_invalid_values_are_not_saved() {
        let (service, store) = service();
        assert!(service.update("financial.platform_fee_percentage", "150").is_err());
        assert!(service.update("general.support_email", "suporte").is_err());
        assert!(service.update("general.support_phone", "11999999999").is_err());
        assert!(service.update("financial.currency", "reais").is_err());
        assert!(service.update("financial.currency", "12€").is_err());
        assert!(service.update("financial.currency", "R$ ").is_err());
        assert!(service.update("financial.currency", "B1L").is_err());
        assert!(service.update("financial.min_withdrawal_amount", "-1").is_err());
        assert!(service.update("notifications.weekly_report", "talvez").is_err());
        assert!(service.update("security.password", "x").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_validation_error_names_the_field() {
        let (service, _) = service();
        match service.update("general.support_email", "nope") {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "support_email");
                assert_eq!(reason, "E-mail de suporte inválido");
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_bool_and_currency_normalization() {
        let (service, _) = service();
        let settings = service.update("notifications.weekly_report", "sim").unwrap();
        assert!(settings.notifications.weekly_report);
        let settings = service.update("financial.currency", "usd").unwrap();
        assert_eq!(settings.financial.currency, "USD");
        assert!(settings.notifications.weekly_report);
    }

    #[test]
    fn test_malformed_document_falls_back_to_defaults() {
        let store = Arc::new(MemoryCredentialStore::with_entries([(SETTINGS_KEY, "{oops")]));
        let service = SettingsService::new(store);
        assert_eq!(service.load().unwrap(), PlatformSettings::default());
    }

    #[test]
    fn test_reset() {
        let (service, store) = service();
        service.update("general.platform_name", "Outra").unwrap();
        assert_eq!(service.reset().unwrap(), PlatformSettings::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("Financial".parse::<SettingsTab>().unwrap(), SettingsTab::Financial);
        assert_eq!(SettingsTab::Notifications.label(), "Notificações");
        assert!("billing".parse::<SettingsTab>().is_err());
    }
}
