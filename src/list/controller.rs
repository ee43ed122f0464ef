//! Page and filter state of one list view and its fetch lifecycle.
//!
//! Every mutation that needs new data returns a [`FetchTicket`]. The ticket
//! carries the query snapshot to send and the generation it was issued
//! under; [`ListController::complete`] applies a result only when its
//! ticket is still the latest one, so a slow superseded response can never
//! overwrite newer state. A page past the end of the reported range is
//! clamped on completion and answered with a follow-up ticket.

use std::marker::PhantomData;

use crate::api::AdminApi;
use crate::api::dto::{Page, Pagination};
use crate::error::{AppError, AppResult};
use crate::list::query::{FilterKind, ListQuery, normalize_filter};
use crate::list::resource::ListResource;

/// Fetch lifecycle of a list view
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Success {
        items: Vec<T>,
        pagination: Pagination,
    },
    Error {
        message: String,
        /// The backend rejected the stored credential
        unauthorized: bool,
    },
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            FetchState::Error {
                unauthorized: true,
                ..
            }
        )
    }
}

/// Permission to fetch one query, valid until a newer ticket is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

/// Outcome of applying a fetch result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer ticket was issued; the result was dropped.
    Superseded,
    /// The requested page lies past the reported range. The page was
    /// clamped and this ticket must be fetched next.
    Refetch(FetchTicket),
}

impl Completion {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied)
    }
}

pub struct ListController<R: ListResource> {
    query: ListQuery,
    search_input: String,
    state: FetchState<R::Item>,
    /// Last pagination the backend reported, used for clamping
    known_pagination: Option<Pagination>,
    generation: u64,
    _resource: PhantomData<R>,
}

impl<R: ListResource> ListController<R> {
    pub fn new(limit: u32) -> Self {
        Self {
            query: ListQuery::new(limit),
            search_input: String::new(),
            state: FetchState::Idle,
            known_pagination: None,
            generation: 0,
            _resource: PhantomData,
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn state(&self) -> &FetchState<R::Item> {
        &self.state
    }

    /// Text typed in the search box, not yet submitted.
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Records to display; empty unless the last fetch succeeded.
    pub fn items(&self) -> &[R::Item] {
        match &self.state {
            FetchState::Success { items, .. } => items,
            _ => &[],
        }
    }

    /// Pagination to display; unset unless the last fetch succeeded.
    pub fn pagination(&self) -> Option<&Pagination> {
        match &self.state {
            FetchState::Success { pagination, .. } => Some(pagination),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the "next" control is enabled.
    pub fn can_go_next(&self) -> bool {
        self.known_pagination
            .is_some_and(|p| self.query.page < p.pages)
    }

    /// Whether the "previous" control is enabled.
    pub fn can_go_prev(&self) -> bool {
        self.query.page > 1
    }

    /// Issues a fetch of the current query and enters `Loading`.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.state = FetchState::Loading;
        FetchTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Applies a fetch result.
    pub fn complete(&mut self, ticket: FetchTicket, result: AppResult<Page<R::Item>>) -> Completion {
        if ticket.generation != self.generation {
            tracing::debug!(
                resource = R::NAME,
                generation = ticket.generation,
                latest = self.generation,
                "Discarding superseded response"
            );
            return Completion::Superseded;
        }

        match result {
            Ok(page) => {
                self.known_pagination = Some(page.pagination);
                let clamped = page.pagination.clamp_page(self.query.page);
                if clamped != self.query.page {
                    tracing::debug!(
                        resource = R::NAME,
                        requested = self.query.page,
                        pages = page.pagination.pages,
                        "Requested page past the end, clamping"
                    );
                    self.query.page = clamped;
                    return Completion::Refetch(self.begin_fetch());
                }

                tracing::debug!(
                    resource = R::NAME,
                    page = page.pagination.page,
                    pages = page.pagination.pages,
                    count = page.items.len(),
                    "Page loaded"
                );
                self.state = FetchState::Success {
                    items: page.items,
                    pagination: page.pagination,
                };
            }
            Err(e) => {
                tracing::error!(resource = R::NAME, error = %e, "Failed to fetch {}", R::NAME);
                self.known_pagination = None;
                self.state = FetchState::Error {
                    message: e.user_message(),
                    unauthorized: e.is_unauthorized(),
                };
            }
        }
        Completion::Applied
    }

    /// Moves to `page`, clamped into the known page range.
    ///
    /// Returns `None` when the clamped page is the current one.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        let target = match &self.known_pagination {
            Some(p) => p.clamp_page(page),
            None => page.max(1),
        };
        if target == self.query.page {
            return None;
        }
        self.query.page = target;
        Some(self.begin_fetch())
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_next() {
            return None;
        }
        self.go_to_page(self.query.page + 1)
    }

    pub fn prev_page(&mut self) -> Option<FetchTicket> {
        if !self.can_go_prev() {
            return None;
        }
        self.go_to_page(self.query.page - 1)
    }

    /// Stages search text without fetching.
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    /// Commits the staged search text, back on page 1.
    pub fn submit_search(&mut self) -> AppResult<FetchTicket> {
        self.ensure_supported(FilterKind::Search)?;
        self.query.search = normalize_filter(Some(&self.search_input));
        Ok(self.reset_and_fetch())
    }

    /// Sets or clears the status filter and fetches page 1.
    pub fn set_status(&mut self, status: Option<&str>) -> AppResult<FetchTicket> {
        self.set_filter(FilterKind::Status, status, R::statuses())
    }

    /// Sets or clears the category filter and fetches page 1.
    pub fn set_category(&mut self, category: Option<&str>) -> AppResult<FetchTicket> {
        self.set_filter(FilterKind::Category, category, R::categories())
    }

    /// Re-issues the current query.
    pub fn retry(&mut self) -> FetchTicket {
        self.begin_fetch()
    }

    fn set_filter(
        &mut self,
        kind: FilterKind,
        value: Option<&str>,
        accepted: Vec<&'static str>,
    ) -> AppResult<FetchTicket> {
        self.ensure_supported(kind)?;
        let value = normalize_filter(value);
        if let Some(v) = &value
            && !accepted.contains(&v.as_str())
        {
            return Err(AppError::validation(
                kind.as_str(),
                format!(
                    "Invalid {} '{}'. Valid values are: {}",
                    kind.as_str(),
                    v,
                    accepted.join(", ")
                ),
            ));
        }
        *self.query.filter_mut(kind) = value;
        Ok(self.reset_and_fetch())
    }

    fn ensure_supported(&self, kind: FilterKind) -> AppResult<()> {
        if R::supports(kind) {
            Ok(())
        } else {
            Err(AppError::validation(
                kind.as_str(),
                format!("The {} view has no {} filter", R::NAME, kind.as_str()),
            ))
        }
    }

    /// Filter changes restart from page 1 before the fetch goes out.
    fn reset_and_fetch(&mut self) -> FetchTicket {
        self.query.page = 1;
        self.begin_fetch()
    }

    /// Runs `ticket` against `api` and applies the result, following up
    /// on a clamped page. Returns whether a result was applied.
    pub async fn execute(&mut self, api: &dyn AdminApi, mut ticket: FetchTicket) -> bool {
        loop {
            let result = R::fetch(api, &ticket.query).await;
            match self.complete(ticket, result) {
                Completion::Applied => return true,
                Completion::Superseded => return false,
                Completion::Refetch(next) => ticket = next,
            }
        }
    }

    /// Fetches the current query.
    pub async fn load(&mut self, api: &dyn AdminApi) -> bool {
        let ticket = self.begin_fetch();
        self.execute(api, ticket).await
    }
}
