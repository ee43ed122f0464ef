use thiserror::Error;

use crate::config::error::ConfigError;

/// Message shown when the backend rejects a login without explaining why.
pub const LOGIN_FAILED_MESSAGE: &str = "Falha no login. Verifique suas credenciais.";

/// Client-wide error type covering every failure the admin client can hit.
///
/// Variants carry enough structure for the caller to decide between an
/// inline message, a redirect to the login view, or a log entry.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or rejected credentials (HTTP 401 or no session)
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but not allowed, e.g. a non-admin account
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Backend answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Request never produced a response (connect, timeout, TLS)
    #[error("Request failed: {operation}")]
    Transport {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Response body could not be decoded into the expected shape
    #[error("Invalid response for {operation}")]
    Decode {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Credential or settings store failure
    #[error("Storage error for key '{key}'")]
    Storage {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Message suitable for inline display next to a form or table.
    ///
    /// Backend-provided messages are passed through untouched; everything
    /// else falls back to the error's display text.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized { message }
            | AppError::Forbidden { message }
            | AppError::Api { message, .. } => message.clone(),
            AppError::Validation { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the error means the stored credential is no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    pub fn storage(key: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Storage {
            key: key.into(),
            source: source.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::MissingFile(_) => "config_file".to_string(),
            other => other.field().unwrap_or("configuration").to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, reason) = errors
            .field_errors()
            .into_iter()
            .next()
            .map(|(field, errs)| {
                let reason = errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "invalid value".to_string());
                (field.to_string(), reason)
            })
            .unwrap_or_else(|| ("input".to_string(), errors.to_string()));
        AppError::Validation { field, reason }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_passes_backend_message_through() {
        let err = AppError::Api {
            status: 400,
            message: "Credenciais inválidas".to_string(),
        };
        assert_eq!(err.user_message(), "Credenciais inválidas");
    }

    #[test]
    fn test_user_message_for_validation_uses_reason() {
        let err = AppError::validation("email", "Email inválido");
        assert_eq!(err.user_message(), "Email inválido");
    }

    #[test]
    fn test_is_unauthorized() {
        let err = AppError::Unauthorized {
            message: "expired".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!AppError::validation("a", "b").is_unauthorized());
    }

    #[test]
    fn test_from_config_error_keeps_field() {
        let err: AppError = ConfigError::invalid("api.base_url", "bad").into();
        match err {
            AppError::Configuration { key, .. } => assert_eq!(key, "api.base_url"),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
