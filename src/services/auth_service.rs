//! Admin sign-in.

use std::sync::Arc;

use validator::Validate;

use crate::api::AdminApi;
use crate::api::dto::{LoginRequest, LoginResponse};
use crate::error::{AppError, AppResult, LOGIN_FAILED_MESSAGE};

/// Shown when the backend accepts the credentials of a non-admin account.
pub const ACCESS_DENIED_MESSAGE: &str =
    "Acesso negado. Apenas administradores podem acessar este painel.";

/// Authenticates against the backend and enforces the admin role.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AdminApi>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Signs in and returns the backend's answer when the account is an admin.
    ///
    /// # Errors
    /// - `Validation` for a malformed email or an empty password
    /// - `Forbidden` with [`ACCESS_DENIED_MESSAGE`] for any other role, even
    ///   though the backend accepted the credentials
    /// - The backend's own rejection, carrying its message or
    ///   [`LOGIN_FAILED_MESSAGE`]
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let request = LoginRequest::new(email, password);
        request.validate()?;

        let response = self.api.login(&request).await.map_err(|e| match e {
            AppError::Unauthorized { .. }
            | AppError::Forbidden { .. }
            | AppError::Api { .. }
            | AppError::Validation { .. } => e,
            other => {
                tracing::warn!(error = ?other, "Login request failed");
                AppError::Unauthorized {
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                }
            }
        })?;

        if !response.user.is_admin() {
            tracing::warn!(
                user = %response.user.email,
                role = %response.user.role,
                "Rejected sign-in of a non-admin account"
            );
            return Err(AppError::Forbidden {
                message: ACCESS_DENIED_MESSAGE.to_string(),
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::UserRole;
    use crate::testing::{self, FakeAdminApi};

    #[tokio::test]
    async fn test_admin_login_succeeds() {
        let api = Arc::new(FakeAdminApi::new());
        let service = AuthService::new(api);
        let response = service.authenticate("admin@x.com", "secret").await.unwrap();
        assert!(response.user.is_admin());
    }

    #[tokio::test]
    async fn test_non_admin_is_denied() {
        let api = Arc::new(FakeAdminApi::new());
        *api.login_user.lock().unwrap() =
            Some(testing::user("p1", "Carlos", UserRole::Professional));
        let service = AuthService::new(api);

        let err = service.authenticate("carlos@x.com", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden { .. }));
        assert_eq!(err.user_message(), ACCESS_DENIED_MESSAGE);
    }

    #[tokio::test]
    async fn test_backend_message_is_kept() {
        let api = Arc::new(FakeAdminApi::new());
        api.fail_next(AppError::Unauthorized {
            message: "Email ou senha inválidos".to_string(),
        });
        let service = AuthService::new(api);

        let err = service.authenticate("admin@x.com", "bad").await.unwrap_err();
        assert_eq!(err.user_message(), "Email ou senha inválidos");
    }

    #[tokio::test]
    async fn test_transport_failure_uses_default_message() {
        let api = Arc::new(FakeAdminApi::new());
        api.fail_next(AppError::Transport {
            operation: "login".to_string(),
            source: anyhow::anyhow!("connection refused"),
        });
        let service = AuthService::new(api);

        let err = service.authenticate("admin@x.com", "secret").await.unwrap_err();
        assert_eq!(err.user_message(), LOGIN_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_backend() {
        let api = Arc::new(FakeAdminApi::new());
        let service = AuthService::new(api.clone());
        assert!(service.authenticate("nope", "secret").await.is_err());
        assert!(service.authenticate("admin@x.com", "").await.is_err());
        assert!(api.calls().is_empty());
    }
}
