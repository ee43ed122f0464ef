//! Settings command handler

use super::CommandOutput;
use crate::error::AppResult;
use crate::routes::Route;
use crate::services::SettingsTab;
use crate::state::AppContext;
use crate::ui::panels::render_settings;

pub struct SettingsCommandHandler<'a> {
    ctx: &'a AppContext,
}

impl<'a> SettingsCommandHandler<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub fn show(&self, tab: SettingsTab) -> AppResult<CommandOutput> {
        self.ctx.enter(Route::Settings)?;
        let settings = self.ctx.services().settings.load()?;
        Ok(CommandOutput::ok(render_settings(&settings, tab)))
    }

    /// Updates `key` (`tab.field`) and shows the tab it belongs to.
    pub fn set(&self, key: &str, value: &str) -> AppResult<CommandOutput> {
        self.ctx.enter(Route::Settings)?;
        let settings = self.ctx.services().settings.update(key, value)?;
        let tab = key
            .split_once('.')
            .and_then(|(tab, _)| tab.parse::<SettingsTab>().ok())
            .unwrap_or(SettingsTab::General);
        Ok(CommandOutput::ok(format!(
            "Configurações salvas com sucesso!\n{}",
            render_settings(&settings, tab)
        )))
    }

    pub fn reset(&self) -> AppResult<CommandOutput> {
        self.ctx.enter(Route::Settings)?;
        let settings = self.ctx.services().settings.reset()?;
        Ok(CommandOutput::ok(format!(
            "Configurações restauradas.\n{}",
            render_settings(&settings, SettingsTab::General)
        )))
    }
}
