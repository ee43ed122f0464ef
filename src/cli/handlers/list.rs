//! List command handlers
//!
//! One generic handler drives the list controller of any resource: it
//! applies the filters, moves to the requested page and renders the
//! resulting table.

use std::sync::Arc;

use jiff::tz::TimeZone;

use super::CommandOutput;
use crate::error::{AppError, AppResult};
use crate::list::{FetchState, ListResource, SharedListController};
use crate::state::{AppContext, LOGIN_REQUIRED_MESSAGE};
use crate::ui::{TableRow, render_list};

/// Filters given on the command line; unsupported ones are rejected by the
/// resource.
#[derive(Debug, Clone, Default)]
pub struct ListFilters<'f> {
    pub search: Option<&'f str>,
    pub status: Option<&'f str>,
    pub category: Option<&'f str>,
}

pub struct ListCommandHandler<'a> {
    ctx: &'a AppContext,
    tz: TimeZone,
}

impl<'a> ListCommandHandler<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            tz: TimeZone::system(),
        }
    }

    /// Renders dates in `tz` instead of the system zone.
    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    /// Fetches one page of `R` and renders it.
    ///
    /// # Errors
    /// - `Unauthorized` without a session or when the backend rejects the
    ///   credential (the session is then ended)
    /// - `Validation` for an unknown status or category value
    pub async fn execute<R>(
        &self,
        page: u32,
        limit: Option<u32>,
        filters: ListFilters<'_>,
    ) -> AppResult<CommandOutput>
    where
        R: ListResource,
        R::Item: TableRow,
    {
        self.ctx.enter(R::route())?;

        let limit = limit.unwrap_or(self.ctx.settings().listing.page_size);
        let controller = SharedListController::<R>::new(Arc::clone(self.ctx.api()), limit);

        controller.with(|c| -> AppResult<()> {
            if let Some(search) = filters.search {
                c.set_search_input(search);
                c.submit_search()?;
            }
            if filters.status.is_some() {
                c.set_status(filters.status)?;
            }
            if filters.category.is_some() {
                c.set_category(filters.category)?;
            }
            c.go_to_page(page);
            Ok(())
        })?;

        controller.load().await;

        let state = controller.snapshot();
        if self.ctx.observe(&state) {
            return Err(AppError::Unauthorized {
                message: LOGIN_REQUIRED_MESSAGE.to_string(),
            });
        }

        let mut text = controller.with(|c| render_list(c, &self.tz));
        match state {
            FetchState::Error { message, .. } => {
                text.push_str(&format!("Erro: {}\n", message));
                Ok(CommandOutput::failed(text))
            }
            _ => Ok(CommandOutput::ok(text)),
        }
    }
}
