//! Overview numbers for the dashboard view.

use std::sync::Arc;

use crate::api::AdminApi;
use crate::api::dto::DashboardStats;
use crate::api::dto::dashboard::count_of;
use crate::error::AppResult;
use crate::ui::format::{category_label, format_brl};

/// Shown when the statistics cannot be loaded.
pub const DASHBOARD_UNAVAILABLE_MESSAGE: &str =
    "Falha ao carregar estatísticas. Verifique se a API está rodando.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtext: String,
}

/// Everything the dashboard view shows, derived from [`DashboardStats`].
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub cards: Vec<StatCard>,
    /// `(label, count)` rows of the user distribution panel
    pub user_distribution: Vec<(&'static str, u64)>,
    /// `(category label, count)` rows, empty when nothing is registered
    pub services_by_category: Vec<(String, u64)>,
    pub stats: DashboardStats,
}

impl DashboardSummary {
    pub fn from_stats(stats: DashboardStats) -> Self {
        let cards = vec![
            StatCard {
                title: "Total de Usuários",
                value: stats.users.total.to_string(),
                subtext: format!("{} Profissionais", stats.users.professionals),
            },
            StatCard {
                title: "Serviços",
                value: stats.services.total.to_string(),
                subtext: format!(
                    "{} Concluídos",
                    count_of(&stats.services.by_status, "completed")
                ),
            },
            StatCard {
                title: "Receita Total",
                value: format_brl(stats.financials.total_revenue),
                subtext: format!("{} Transações", stats.financials.total_transactions),
            },
            StatCard {
                title: "Orçamentos",
                value: stats.quotes.total.to_string(),
                subtext: format!(
                    "{} Aceitos",
                    count_of(&stats.quotes.by_status, "accepted")
                ),
            },
        ];

        let user_distribution = vec![
            ("Profissionais", stats.users.professionals),
            ("Clientes", stats.users.clients),
            ("Verificados", stats.users.verified),
            ("Admins", stats.users.admins),
        ];

        let services_by_category = stats
            .services
            .by_category
            .iter()
            .map(|(category, count)| (category_label(category), *count))
            .collect();

        Self {
            cards,
            user_distribution,
            services_by_category,
            stats,
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn AdminApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Fetches the statistics and derives the dashboard panels.
    pub async fn load(&self) -> AppResult<DashboardSummary> {
        let stats = self.api.dashboard_stats().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to load dashboard statistics");
        })?;
        Ok(DashboardSummary::from_stats(stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testing::FakeAdminApi;

    fn stats() -> DashboardStats {
        serde_json::from_value(serde_json::json!({
            "users": {"total": 120, "verified": 80, "clients": 90, "professionals": 28, "admins": 2},
            "services": {"total": 45, "byStatus": {"completed": 12, "pending": 20},
                         "byCategory": {"moveis": 30, "janelas": 15}},
            "financials": {"totalRevenue": 154000.0, "totalTransactions": 37, "byStatus": {}},
            "quotes": {"total": 60, "byStatus": {"accepted": 18}},
            "reviews": {"total": 10, "averageRating": 4.6}
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_cards() {
        let summary = DashboardSummary::from_stats(stats());
        let cards: Vec<(&str, &str, &str)> = summary
            .cards
            .iter()
            .map(|c| (c.title, c.value.as_str(), c.subtext.as_str()))
            .collect();
        assert_eq!(
            cards,
            vec![
                ("Total de Usuários", "120", "28 Profissionais"),
                ("Serviços", "45", "12 Concluídos"),
                ("Receita Total", "R$ 154.000,00", "37 Transações"),
                ("Orçamentos", "60", "18 Aceitos"),
            ]
        );
        assert_eq!(summary.user_distribution[3], ("Admins", 2));
        assert_eq!(
            summary.services_by_category,
            vec![("Janelas".to_string(), 15), ("Móveis".to_string(), 30)]
        );
    }

    #[test]
    fn test_summary_of_empty_stats() {
        let summary = DashboardSummary::from_stats(DashboardStats::default());
        assert_eq!(summary.cards[1].subtext, "0 Concluídos");
        assert!(summary.services_by_category.is_empty());
    }

    #[tokio::test]
    async fn test_load_propagates_errors() {
        let api = Arc::new(FakeAdminApi::new());
        *api.stats.lock().unwrap() = stats();
        let service = DashboardService::new(api.clone());
        assert_eq!(service.load().await.unwrap().stats.users.total, 120);

        api.fail_next(AppError::Api {
            status: 502,
            message: "Bad Gateway".to_string(),
        });
        assert!(service.load().await.is_err());
        assert_eq!(api.calls(), vec!["/admin/dashboard", "/admin/dashboard"]);
    }
}
