//! Dashboard command handler

use super::CommandOutput;
use crate::error::AppResult;
use crate::routes::Route;
use crate::services::DASHBOARD_UNAVAILABLE_MESSAGE;
use crate::state::AppContext;
use crate::ui::panels::render_dashboard;

pub struct DashboardCommandHandler<'a> {
    ctx: &'a AppContext,
}

impl<'a> DashboardCommandHandler<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Loads and renders the dashboard.
    ///
    /// A rejected credential is returned as an error; any other failure
    /// prints the unavailable notice instead of the panels.
    pub async fn execute(&self) -> AppResult<CommandOutput> {
        let result = self
            .ctx
            .protected(Route::Dashboard, self.ctx.services().dashboard.load())
            .await;

        match result {
            Ok(summary) => Ok(CommandOutput::ok(render_dashboard(&summary))),
            Err(e) if e.is_unauthorized() => Err(e),
            Err(_) => Ok(CommandOutput::failed(format!(
                "{}\n",
                DASHBOARD_UNAVAILABLE_MESSAGE
            ))),
        }
    }
}
