//! Test doubles for the backend: an HTTP mock served by axum and an
//! in-process `AdminApi` fake.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use crate::api::client::list_params;
use crate::api::dto::pagination::Pagination;
use crate::api::dto::{
    AuthTokens, DashboardStats, LoginRequest, LoginResponse, Page, PaymentStatus, Quote,
    QuoteStatus, Service, ServiceCategory, ServiceStatus, Transaction, User, UserRole,
};
use crate::api::{AdminApi, PageRequest};
use crate::error::{AppError, AppResult};

// ============================================================================
// HTTP mock backend
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path_and_query: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Backend double listening on an ephemeral local port under `/api`.
pub struct MockBackend {
    pub base_url: String,
    state: MockState,
    server: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = MockState::default();
        let app = axum::Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            server,
        }
    }

    /// Answers `method path` with `status` and a JSON body from now on.
    pub fn respond(&self, method: reqwest::Method, path: &str, status: u16, body: Value) {
        self.state
            .responses
            .lock()
            .unwrap()
            .insert((method.as_str().to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.as_str().to_string(),
        path_and_query,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let key = (method.as_str().to_string(), uri.path().to_string());
    let canned = state.responses.lock().unwrap().get(&key).cloned();
    match canned {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "Rota não encontrada"})),
        )
            .into_response(),
    }
}

// ============================================================================
// In-process fake
// ============================================================================

pub fn user(id: &str, name: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@email.com", id),
        phone: None,
        role,
        is_verified: true,
        is_active: true,
        created_at: Some("2024-03-10T14:00:00Z".parse().unwrap()),
        avatar: None,
    }
}

pub fn service(id: &str, status: ServiceStatus, category: ServiceCategory) -> Service {
    Service {
        id: id.to_string(),
        title: format!("Serviço {}", id),
        description: None,
        category,
        status,
        client_id: None,
        professional_id: None,
        created_at: Some("2024-03-10T14:00:00Z".parse().unwrap()),
    }
}

pub fn quote(id: &str, status: QuoteStatus, total_price: f64) -> Quote {
    Quote {
        id: id.to_string(),
        title: Some(format!("Orçamento {}", id)),
        service_id: None,
        client_id: None,
        professional_id: None,
        total_price,
        status,
        created_at: Some("2024-03-10T14:00:00Z".parse().unwrap()),
    }
}

pub fn transaction(id: &str, status: PaymentStatus, amount: f64) -> Transaction {
    Transaction {
        id: id.to_string(),
        quote_id: None,
        amount,
        platform_fee: amount * 0.1,
        net_amount: amount * 0.9,
        status,
        payment_method: Some("pix".to_string()),
        client_id: None,
        professional_id: None,
        created_at: Some("2024-03-10T14:00:00Z".parse().unwrap()),
    }
}

/// `AdminApi` over in-memory datasets.
///
/// Every call is recorded as `path?query` using the same parameter rules as
/// the HTTP client.
#[derive(Default)]
pub struct FakeAdminApi {
    pub users: Mutex<Vec<User>>,
    pub services: Mutex<Vec<Service>>,
    pub quotes: Mutex<Vec<Quote>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub stats: Mutex<DashboardStats>,
    /// User returned by a successful login
    pub login_user: Mutex<Option<User>>,
    /// Error returned by the next call, consumed once
    pub fail_next: Mutex<Option<AppError>>,
    /// Every protected call answers 401 while set
    pub reject_token: AtomicBool,
    /// Delay applied to successive list calls
    pub delays: Mutex<VecDeque<Duration>>,
    pub calls: Mutex<Vec<String>>,
    pub token: Mutex<Option<String>>,
}

impl FakeAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_next(&self, error: AppError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    fn record(&self, path: &str, params: &[(&str, String)]) {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let call = if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        };
        self.calls.lock().unwrap().push(call);
    }

    async fn gate(&self) -> AppResult<()> {
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        if self.reject_token.load(Ordering::SeqCst) {
            return Err(AppError::Unauthorized {
                message: "Token inválido".to_string(),
            });
        }
        Ok(())
    }
}

fn paginate<T: Clone>(items: Vec<T>, window: PageRequest) -> Page<T> {
    let pagination = Pagination::from_total(window.page, window.limit, items.len() as u64);
    let start = ((window.page - 1) * window.limit) as usize;
    let items = items
        .into_iter()
        .skip(start)
        .take(window.limit as usize)
        .collect();
    Page { items, pagination }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
    fn set_access_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        self.record("/auth/login", &[]);
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        let user = self
            .login_user
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| user("a1", &request.email, UserRole::Admin));
        Ok(LoginResponse {
            user,
            tokens: AuthTokens {
                access_token: "fake-token".to_string(),
                refresh_token: None,
            },
        })
    }

    async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        self.record("/admin/dashboard", &[]);
        self.gate().await?;
        Ok(self.stats.lock().unwrap().clone())
    }

    async fn list_users(
        &self,
        window: PageRequest,
        role: &UserRole,
        search: Option<&str>,
    ) -> AppResult<Page<User>> {
        self.record(
            "/users",
            &list_params(window, [("role", Some(role.as_str())), ("search", search)]),
        );
        self.gate().await?;
        let needle = search.map(str::to_lowercase).unwrap_or_default();
        let items = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| &u.role == role && u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(paginate(items, window))
    }

    async fn list_services(
        &self,
        window: PageRequest,
        status: Option<&ServiceStatus>,
        category: Option<&ServiceCategory>,
    ) -> AppResult<Page<Service>> {
        self.record(
            "/services",
            &list_params(
                window,
                [
                    ("status", status.map(ServiceStatus::as_str)),
                    ("category", category.map(ServiceCategory::as_str)),
                ],
            ),
        );
        self.gate().await?;
        let items = self
            .services
            .lock()
            .unwrap()
            .iter()
            .filter(|s| status.is_none_or(|st| &s.status == st))
            .filter(|s| category.is_none_or(|c| &s.category == c))
            .cloned()
            .collect();
        Ok(paginate(items, window))
    }

    async fn list_quotes(
        &self,
        window: PageRequest,
        status: Option<&QuoteStatus>,
    ) -> AppResult<Page<Quote>> {
        self.record(
            "/quotes",
            &list_params(window, [("status", status.map(QuoteStatus::as_str))]),
        );
        self.gate().await?;
        let items = self
            .quotes
            .lock()
            .unwrap()
            .iter()
            .filter(|q| status.is_none_or(|st| &q.status == st))
            .cloned()
            .collect();
        Ok(paginate(items, window))
    }

    async fn list_payments(
        &self,
        window: PageRequest,
        status: Option<&PaymentStatus>,
    ) -> AppResult<Page<Transaction>> {
        self.record(
            "/payments",
            &list_params(window, [("status", status.map(PaymentStatus::as_str))]),
        );
        self.gate().await?;
        let items = self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|t| status.is_none_or(|st| &t.status == st))
            .cloned()
            .collect();
        Ok(paginate(items, window))
    }
}
