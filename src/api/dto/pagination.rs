//! Pagination metadata and paged list responses.

use serde::{Deserialize, Serialize};

use super::payment::Transaction;
use super::quote::Quote;
use super::service::Service;
use super::user::User;

/// Server-computed description of a result window.
///
/// `pages` is `ceil(total / limit)`; a page number outside `[1, pages]` is
/// never requested by the list controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    /// Builds metadata locally when the backend omits it.
    pub fn from_total(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let pages = total.div_ceil(u64::from(limit));
        Self {
            page: page.max(1),
            limit,
            total,
            pages: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }

    /// Whether the "next" control is enabled
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Whether the "previous" control is enabled
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Clamps a requested page into `[1, max(pages, 1)]`.
    pub fn clamp_page(&self, page: u32) -> u32 {
        page.clamp(1, self.pages.max(1))
    }
}

/// One page of records together with its pagination metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    fn from_wire(items: Vec<T>, pagination: Option<Pagination>, page: u32, limit: u32) -> Self {
        let pagination = pagination
            .unwrap_or_else(|| Pagination::from_total(page, limit, items.len() as u64));
        Self { items, pagination }
    }
}

/// `GET /users` payload
#[derive(Debug, Deserialize)]
pub struct UsersPayload {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `GET /services` payload
#[derive(Debug, Deserialize)]
pub struct ServicesPayload {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `GET /quotes` payload
#[derive(Debug, Deserialize)]
pub struct QuotesPayload {
    #[serde(default)]
    pub quotes: Vec<Quote>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `GET /payments` payload; `transactions` may be missing entirely.
#[derive(Debug, Deserialize)]
pub struct PaymentsPayload {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

impl UsersPayload {
    pub fn into_page(self, page: u32, limit: u32) -> Page<User> {
        Page::from_wire(self.users, self.pagination, page, limit)
    }
}

impl ServicesPayload {
    pub fn into_page(self, page: u32, limit: u32) -> Page<Service> {
        Page::from_wire(self.services, self.pagination, page, limit)
    }
}

impl QuotesPayload {
    pub fn into_page(self, page: u32, limit: u32) -> Page<Quote> {
        Page::from_wire(self.quotes, self.pagination, page, limit)
    }
}

impl PaymentsPayload {
    pub fn into_page(self, page: u32, limit: u32) -> Page<Transaction> {
        Page::from_wire(self.transactions, self.pagination, page, limit)
    }
}
