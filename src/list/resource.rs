//! The five list views and how each one fetches its page.

use async_trait::async_trait;

use crate::api::dto::{
    Page, PaymentStatus, Quote, QuoteStatus, Service, ServiceCategory, ServiceStatus,
    Transaction, User, UserRole,
};
use crate::api::{AdminApi, PageRequest};
use crate::error::AppResult;
use crate::list::query::{FilterKind, ListQuery};
use crate::routes::Route;

/// A paged collection backed by one backend endpoint.
#[async_trait]
pub trait ListResource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Name used in logs
    const NAME: &'static str;

    /// Filters this view offers
    const FILTERS: &'static [FilterKind];

    /// Table headers, one per rendered cell
    const COLUMNS: &'static [&'static str];

    /// Shown instead of rows when the page is empty
    const EMPTY_MESSAGE: &'static str;

    fn route() -> Route;

    /// Accepted status values, empty when status is not filterable.
    fn statuses() -> Vec<&'static str> {
        Vec::new()
    }

    /// Accepted category values, empty when category is not filterable.
    fn categories() -> Vec<&'static str> {
        Vec::new()
    }

    fn supports(kind: FilterKind) -> bool {
        Self::FILTERS.contains(&kind)
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<Self::Item>>;
}

fn window(query: &ListQuery) -> PageRequest {
    PageRequest::new(query.page, query.limit)
}

/// Users with role `client`
pub struct Clients;

/// Users with role `professional`
pub struct Professionals;

pub struct Services;

pub struct Quotes;

pub struct Payments;

#[async_trait]
impl ListResource for Clients {
    type Item = User;
    const NAME: &'static str = "clients";
    const FILTERS: &'static [FilterKind] = &[FilterKind::Search];
    const COLUMNS: &'static [&'static str] = &["Cliente", "E-mail", "Telefone", "Status", "Cadastro"];
    const EMPTY_MESSAGE: &'static str = "Nenhum cliente encontrado.";

    fn route() -> Route {
        Route::Clients
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<User>> {
        api.list_users(window(query), &UserRole::Client, query.search.as_deref())
            .await
    }
}

#[async_trait]
impl ListResource for Professionals {
    type Item = User;
    const NAME: &'static str = "professionals";
    const FILTERS: &'static [FilterKind] = &[FilterKind::Search];
    const COLUMNS: &'static [&'static str] =
        &["Profissional", "E-mail", "Telefone", "Status", "Cadastro"];
    const EMPTY_MESSAGE: &'static str = "Nenhum profissional encontrado.";

    fn route() -> Route {
        Route::Professionals
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<User>> {
        api.list_users(
            window(query),
            &UserRole::Professional,
            query.search.as_deref(),
        )
        .await
    }
}

#[async_trait]
impl ListResource for Services {
    type Item = Service;
    const NAME: &'static str = "services";
    const FILTERS: &'static [FilterKind] = &[FilterKind::Status, FilterKind::Category];
    const COLUMNS: &'static [&'static str] =
        &["Serviço", "Categoria", "Cliente", "Profissional", "Status", "Data"];
    const EMPTY_MESSAGE: &'static str = "Nenhum serviço encontrado.";

    fn route() -> Route {
        Route::Services
    }

    fn statuses() -> Vec<&'static str> {
        ServiceStatus::KNOWN.iter().map(ServiceStatus::as_str).collect()
    }

    fn categories() -> Vec<&'static str> {
        ServiceCategory::KNOWN
            .iter()
            .map(ServiceCategory::as_str)
            .collect()
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<Service>> {
        let status = query.status.clone().map(ServiceStatus::from);
        let category = query.category.clone().map(ServiceCategory::from);
        api.list_services(window(query), status.as_ref(), category.as_ref())
            .await
    }
}

#[async_trait]
impl ListResource for Quotes {
    type Item = Quote;
    const NAME: &'static str = "quotes";
    const FILTERS: &'static [FilterKind] = &[FilterKind::Status];
    const COLUMNS: &'static [&'static str] = &[
        "Orçamento",
        "Serviço",
        "Cliente",
        "Profissional",
        "Valor",
        "Status",
        "Data",
    ];
    const EMPTY_MESSAGE: &'static str = "Nenhum orçamento encontrado.";

    fn route() -> Route {
        Route::Quotes
    }

    fn statuses() -> Vec<&'static str> {
        QuoteStatus::KNOWN.iter().map(QuoteStatus::as_str).collect()
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<Quote>> {
        let status = query.status.clone().map(QuoteStatus::from);
        api.list_quotes(window(query), status.as_ref()).await
    }
}

#[async_trait]
impl ListResource for Payments {
    type Item = Transaction;
    const NAME: &'static str = "payments";
    const FILTERS: &'static [FilterKind] = &[FilterKind::Status];
    const COLUMNS: &'static [&'static str] = &[
        "ID Transação",
        "Cliente",
        "Profissional",
        "Valor Total",
        "Comissão (Plataforma)",
        "Status",
        "Data",
    ];
    const EMPTY_MESSAGE: &'static str = "Nenhum pagamento encontrado.";

    fn route() -> Route {
        Route::Payments
    }

    fn statuses() -> Vec<&'static str> {
        PaymentStatus::KNOWN.iter().map(PaymentStatus::as_str).collect()
    }

    async fn fetch(api: &dyn AdminApi, query: &ListQuery) -> AppResult<Page<Transaction>> {
        let status = query.status.clone().map(PaymentStatus::from);
        api.list_payments(window(query), status.as_ref()).await
    }
}
