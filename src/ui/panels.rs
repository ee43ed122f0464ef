//! Text renderings of the dashboard, settings and session panels.

use std::fmt::Write;

use crate::api::dto::User;
use crate::routes::Route;
use crate::services::{DashboardSummary, PlatformSettings, SettingsTab};
use crate::ui::format::format_brl;
use crate::ui::table::Table;

pub const NO_SERVICES_MESSAGE: &str = "Nenhum serviço registrado";

const SECURITY_NOTICE: &str = "Configurações de segurança ainda não disponíveis.";

fn yes_no(value: bool) -> &'static str {
    if value { "Sim" } else { "Não" }
}

/// Stat cards followed by the distribution panels.
pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();

    for card in &summary.cards {
        let _ = writeln!(out, "{}: {} ({})", card.title, card.value, card.subtext);
    }

    out.push_str("\nDistribuição de Usuários\n");
    let mut users = Table::new(&["Tipo", "Quantidade"]);
    for (label, count) in &summary.user_distribution {
        users.push_row(vec![label.to_string(), count.to_string()]);
    }
    out.push_str(&users.render());

    out.push_str("\nServiços por Categoria\n");
    if summary.services_by_category.is_empty() {
        out.push_str(NO_SERVICES_MESSAGE);
        out.push('\n');
    } else {
        let mut categories = Table::new(&["Categoria", "Quantidade"]);
        for (label, count) in &summary.services_by_category {
            categories.push_row(vec![label.clone(), count.to_string()]);
        }
        out.push_str(&categories.render());
    }

    out
}

/// One settings tab as `label: value` lines.
pub fn render_settings(settings: &PlatformSettings, tab: SettingsTab) -> String {
    let mut out = format!("{}\n", tab.label());
    let rows: Vec<(&str, String)> = match tab {
        SettingsTab::General => vec![
            ("Nome da Plataforma", settings.general.platform_name.clone()),
            ("E-mail de Suporte", settings.general.support_email.clone()),
            ("Telefone de Suporte", settings.general.support_phone.clone()),
            (
                "Aprovar profissionais automaticamente",
                yes_no(settings.general.auto_approve_professionals).to_string(),
            ),
        ],
        SettingsTab::Financial => vec![
            (
                "Taxa da Plataforma (%)",
                settings.financial.platform_fee_percentage.to_string(),
            ),
            (
                "Saque Mínimo",
                format_brl(settings.financial.min_withdrawal_amount),
            ),
            ("Moeda", settings.financial.currency.clone()),
        ],
        SettingsTab::Notifications => vec![
            (
                "E-mail para novos usuários",
                yes_no(settings.notifications.email_on_new_user).to_string(),
            ),
            (
                "E-mail para novos serviços",
                yes_no(settings.notifications.email_on_new_service).to_string(),
            ),
            (
                "E-mail para disputas",
                yes_no(settings.notifications.email_on_dispute).to_string(),
            ),
            (
                "Relatório semanal",
                yes_no(settings.notifications.weekly_report).to_string(),
            ),
        ],
        SettingsTab::Security => {
            out.push_str(SECURITY_NOTICE);
            out.push('\n');
            return out;
        }
    };

    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        let pad = width - label.chars().count();
        let _ = writeln!(out, "{}{}  {}", label, " ".repeat(pad), value);
    }
    out
}

/// Signed-in admin and the sidebar with the current route marked.
pub fn render_session(user: &User, current: Route) -> String {
    let mut out = format!("{} <{}>\n", user.name, user.email);
    for route in Route::SIDEBAR {
        let marker = if route == current { ">" } else { " " };
        let _ = writeln!(out, "{} {:<14} {}", marker, route.label(), route.path());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{DashboardStats, UserRole};
    use crate::testing;

    #[test]
    fn test_dashboard_without_categories() {
        let summary = DashboardSummary::from_stats(DashboardStats::default());
        let out = render_dashboard(&summary);
        assert!(out.contains("Total de Usuários: 0 (0 Profissionais)"));
        assert!(out.contains("Receita Total: R$ 0,00 (0 Transações)"));
        assert!(out.contains(NO_SERVICES_MESSAGE));
    }

    #[test]
    fn test_dashboard_with_categories() {
        let mut stats = DashboardStats::default();
        stats.services.total = 3;
        stats.services.by_category.insert("moveis".to_string(), 3);
        let out = render_dashboard(&DashboardSummary::from_stats(stats));
        assert!(out.contains("Móveis"));
        assert!(!out.contains(NO_SERVICES_MESSAGE));
    }

    #[test]
    fn test_settings_tabs() {
        let settings = PlatformSettings::default();
        let general = render_settings(&settings, SettingsTab::General);
        assert!(general.starts_with("Geral\n"));
        assert!(general.contains("Marcenaria App"));
        assert!(general.contains("Aprovar profissionais automaticamente  Não"));

        let financial = render_settings(&settings, SettingsTab::Financial);
        assert!(financial.contains("R$ 50,00"));
        assert!(financial.contains("BRL"));

        let security = render_settings(&settings, SettingsTab::Security);
        assert!(security.contains(SECURITY_NOTICE));
    }

    #[test]
    fn test_session_marks_current_route() {
        let user = testing::user("u1", "Ana Admin", UserRole::Admin);
        let out = render_session(&user, Route::Payments);
        assert!(out.starts_with("Ana Admin <"));
        let marked: Vec<&str> = out.lines().filter(|l| l.starts_with('>')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("/payments"));
    }
}
