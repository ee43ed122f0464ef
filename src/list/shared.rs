//! A list controller shared between tasks.
//!
//! Mutations happen under a short lock; fetches run outside it. A ticket is
//! checked against the latest generation and takes over the in-flight slot
//! under that same lock, so a superseded ticket can never cancel a newer
//! fetch. The generation check in [`ListController::complete`] drops
//! anything that slips through.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

use crate::api::AdminApi;
use crate::error::AppResult;
use crate::list::controller::{Completion, FetchState, FetchTicket, ListController};
use crate::list::resource::ListResource;

struct Slot<R: ListResource> {
    controller: ListController<R>,
    in_flight: Option<CancellationToken>,
}

pub struct SharedListController<R: ListResource> {
    inner: Arc<Mutex<Slot<R>>>,
    api: Arc<dyn AdminApi>,
}

impl<R: ListResource> Clone for SharedListController<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            api: Arc::clone(&self.api),
        }
    }
}

impl<R: ListResource> SharedListController<R> {
    pub fn new(api: Arc<dyn AdminApi>, limit: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Slot {
                controller: ListController::new(limit),
                in_flight: None,
            })),
            api,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` on the controller under the lock.
    pub fn with<T>(&self, f: impl FnOnce(&mut ListController<R>) -> T) -> T {
        f(&mut self.lock().controller)
    }

    /// Copy of the current fetch state.
    pub fn snapshot(&self) -> FetchState<R::Item> {
        self.lock().controller.state().clone()
    }

    /// Claims the in-flight slot for `ticket`, cancelling the fetch it
    /// replaces. `None` when a newer ticket has already been issued.
    fn claim(&self, ticket: &FetchTicket) -> Option<CancellationToken> {
        let mut slot = self.lock();
        if ticket.generation() != slot.controller.generation() {
            return None;
        }
        let token = CancellationToken::new();
        if let Some(previous) = slot.in_flight.replace(token.clone()) {
            previous.cancel();
        }
        Some(token)
    }

    /// Sends `ticket`, cancelling whatever fetch was still running.
    ///
    /// Returns whether the result was applied.
    pub async fn dispatch(&self, mut ticket: FetchTicket) -> bool {
        loop {
            let generation = ticket.generation();
            let Some(token) = self.claim(&ticket) else {
                tracing::debug!(resource = R::NAME, generation, "Ticket superseded before dispatch");
                return false;
            };

            let result = tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(resource = R::NAME, generation, "Fetch cancelled by a newer one");
                    return false;
                }
                result = R::fetch(self.api.as_ref(), ticket.query()) => result,
            };

            match self.lock().controller.complete(ticket, result) {
                Completion::Applied => return true,
                Completion::Superseded => return false,
                Completion::Refetch(next) => ticket = next,
            }
        }
    }

    pub async fn load(&self) -> bool {
        let ticket = self.with(|c| c.begin_fetch());
        self.dispatch(ticket).await
    }

    pub async fn go_to_page(&self, page: u32) -> bool {
        match self.with(|c| c.go_to_page(page)) {
            Some(ticket) => self.dispatch(ticket).await,
            None => false,
        }
    }

    pub async fn next_page(&self) -> bool {
        match self.with(|c| c.next_page()) {
            Some(ticket) => self.dispatch(ticket).await,
            None => false,
        }
    }

    pub async fn prev_page(&self) -> bool {
        match self.with(|c| c.prev_page()) {
            Some(ticket) => self.dispatch(ticket).await,
            None => false,
        }
    }

    pub fn set_search_input(&self, text: impl Into<String>) {
        self.with(|c| c.set_search_input(text));
    }

    pub async fn submit_search(&self) -> AppResult<bool> {
        let ticket = self.with(|c| c.submit_search())?;
        Ok(self.dispatch(ticket).await)
    }

    pub async fn set_status(&self, status: Option<&str>) -> AppResult<bool> {
        let ticket = self.with(|c| c.set_status(status))?;
        Ok(self.dispatch(ticket).await)
    }

    pub async fn set_category(&self, category: Option<&str>) -> AppResult<bool> {
        let ticket = self.with(|c| c.set_category(category))?;
        Ok(self.dispatch(ticket).await)
    }

    pub async fn retry(&self) -> bool {
        let ticket = self.with(|c| c.retry());
        self.dispatch(ticket).await
    }
}
