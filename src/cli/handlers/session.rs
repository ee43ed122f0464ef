//! Login, logout and whoami handlers

use super::CommandOutput;
use crate::error::{AppError, AppResult};
use crate::state::{AppContext, LOGIN_REQUIRED_MESSAGE};
use crate::ui::panels::render_session;

/// Handler for the session commands
pub struct SessionCommandHandler<'a> {
    ctx: &'a AppContext,
}

impl<'a> SessionCommandHandler<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<CommandOutput> {
        let user = self.ctx.login(email, password).await?;
        Ok(CommandOutput::ok(format!(
            "Bem-vindo, {}!\n{}",
            user.name,
            render_session(&user, self.ctx.current_route())
        )))
    }

    pub fn logout(&self) -> CommandOutput {
        let was_signed_in = self.ctx.is_authenticated();
        self.ctx.logout();
        if was_signed_in {
            CommandOutput::ok("Sessão encerrada.\n")
        } else {
            CommandOutput::ok("Nenhuma sessão ativa.\n")
        }
    }

    /// # Errors
    /// `Unauthorized` when no session is stored
    pub fn whoami(&self) -> AppResult<CommandOutput> {
        let user = self
            .ctx
            .current_user()
            .ok_or_else(|| AppError::Unauthorized {
                message: LOGIN_REQUIRED_MESSAGE.to_string(),
            })?;
        Ok(CommandOutput::ok(render_session(
            &user,
            self.ctx.current_route(),
        )))
    }
}
