use std::sync::{PoisonError, RwLock};
use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::api::dto::pagination::{PaymentsPayload, QuotesPayload, ServicesPayload, UsersPayload};
use crate::api::dto::{
    ApiEnvelope, DashboardStats, LoginRequest, LoginResponse, Page, PaymentStatus, Quote,
    QuoteStatus, Service, ServiceCategory, ServiceStatus, Transaction, User, UserRole,
};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult, ResponseErrorConverter};
use crate::external::build_http_client;

/// Page window sent as `page` and `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

/// Operations the admin client needs from the backend.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Sets or clears the bearer token sent with subsequent requests.
    fn set_access_token(&self, token: Option<String>);

    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse>;

    /// `GET /admin/dashboard`
    async fn dashboard_stats(&self) -> AppResult<DashboardStats>;

    /// `GET /users?page&limit&role&search`
    async fn list_users(
        &self,
        window: PageRequest,
        role: &UserRole,
        search: Option<&str>,
    ) -> AppResult<Page<User>>;

    /// `GET /services?page&limit&status&category`
    async fn list_services(
        &self,
        window: PageRequest,
        status: Option<&ServiceStatus>,
        category: Option<&ServiceCategory>,
    ) -> AppResult<Page<Service>>;

    /// `GET /quotes?page&limit&status`
    async fn list_quotes(
        &self,
        window: PageRequest,
        status: Option<&QuoteStatus>,
    ) -> AppResult<Page<Quote>>;

    /// `GET /payments?page&limit&status`
    async fn list_payments(
        &self,
        window: PageRequest,
        status: Option<&PaymentStatus>,
    ) -> AppResult<Page<Transaction>>;
}

/// `AdminApi` over HTTP.
pub struct HttpAdminApi {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpAdminApi {
    /// Creates a client for the backend described by `config`.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = build_http_client(config)?;
        Self::with_client(client, &config.base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| AppError::Configuration {
            key: "api.base_url".to_string(),
            source: e.into(),
        })?;

        Ok(Self {
            client,
            base_url,
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path)).map_err(|e| {
            AppError::Internal {
                source: anyhow::Error::new(e).context(format!("invalid endpoint {}", path)),
            }
        })?;

        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        let token = self
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sends the request and unwraps the `{ success, data, message }` envelope.
    ///
    /// `failure_message` replaces the HTTP reason phrase when an error
    /// response carries no message of its own.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
        failure_message: Option<&str>,
    ) -> AppResult<T> {
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| ResponseErrorConverter::convert_transport(e, operation))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ResponseErrorConverter::convert_transport(e, operation))?;

        tracing::debug!(
            operation,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if !status.is_success() {
            let error = match failure_message {
                Some(fallback) => ResponseErrorConverter::convert_status_or(status, &body, fallback),
                None => ResponseErrorConverter::convert_status(status, &body),
            };
            tracing::warn!(operation, status = status.as_u16(), error = %error, "Backend request failed");
            return Err(error);
        }

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| ResponseErrorConverter::convert_decode(e, operation))?;

        if envelope.is_failure() {
            let message = envelope
                .message
                .or_else(|| failure_message.map(str::to_string))
                .unwrap_or_else(|| "Request was not successful".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(envelope.data)
            .map_err(|e| ResponseErrorConverter::convert_decode(e, operation))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        operation: &str,
    ) -> AppResult<T> {
        let url = self.endpoint(path, params)?;
        tracing::debug!(operation, url = %url, "GET");
        self.send(self.request(Method::GET, url), operation, None)
            .await
    }
}

/// `page` and `limit` first, then the non-empty filters in the given order.
pub(crate) fn list_params<'a>(
    window: PageRequest,
    filters: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> Vec<(&'a str, String)> {
    let mut params = vec![
        ("page", window.page.to_string()),
        ("limit", window.limit.to_string()),
    ];
    for (key, value) in filters {
        if let Some(value) = value.map(str::trim)
            && !value.is_empty()
        {
            params.push((key, value.to_string()));
        }
    }
    params
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    fn set_access_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        request.validate()?;

        let url = self.endpoint("/auth/login", &[])?;
        tracing::debug!(email = %request.email, "Signing in");
        let builder = self.client.request(Method::POST, url).json(request);
        self.send(
            builder,
            "login",
            Some(crate::error::LOGIN_FAILED_MESSAGE),
        )
        .await
    }

    async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.get("/admin/dashboard", &[], "dashboard_stats").await
    }

    async fn list_users(
        &self,
        window: PageRequest,
        role: &UserRole,
        search: Option<&str>,
    ) -> AppResult<Page<User>> {
        let params = list_params(window, [("role", Some(role.as_str())), ("search", search)]);
        let payload: UsersPayload = self.get("/users", &params, "list_users").await?;
        Ok(payload.into_page(window.page, window.limit))
    }

    async fn list_services(
        &self,
        window: PageRequest,
        status: Option<&ServiceStatus>,
        category: Option<&ServiceCategory>,
    ) -> AppResult<Page<Service>> {
        let params = list_params(
            window,
            [
                ("status", status.map(ServiceStatus::as_str)),
                ("category", category.map(ServiceCategory::as_str)),
            ],
        );
        let payload: ServicesPayload = self.get("/services", &params, "list_services").await?;
        Ok(payload.into_page(window.page, window.limit))
    }

    async fn list_quotes(
        &self,
        window: PageRequest,
        status: Option<&QuoteStatus>,
    ) -> AppResult<Page<Quote>> {
        let params = list_params(window, [("status", status.map(QuoteStatus::as_str))]);
        let payload: QuotesPayload = self.get("/quotes", &params, "list_quotes").await?;
        Ok(payload.into_page(window.page, window.limit))
    }

    async fn list_payments(
        &self,
        window: PageRequest,
        status: Option<&PaymentStatus>,
    ) -> AppResult<Page<Transaction>> {
        let params = list_params(window, [("status", status.map(PaymentStatus::as_str))]);
        let payload: PaymentsPayload = self.get("/payments", &params, "list_payments").await?;
        Ok(payload.into_page(window.page, window.limit))
    }
}
