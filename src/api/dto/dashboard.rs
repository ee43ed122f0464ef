//! Aggregate counters served by `GET /admin/dashboard`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub users: UserStats,
    pub services: ServiceStats,
    pub financials: FinancialStats,
    pub quotes: QuoteStats,
    pub reviews: ReviewStats,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total: u64,
    pub verified: u64,
    pub clients: u64,
    pub professionals: u64,
    pub admins: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceStats {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    pub by_category: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialStats {
    pub total_revenue: f64,
    pub total_transactions: u64,
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteStats {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewStats {
    pub total: u64,
    pub average_rating: f64,
}

/// Count stored under `key`, or 0 when the backend has no bucket for it.
pub fn count_of(map: &BTreeMap<String, u64>, key: &str) -> u64 {
    map.get(key).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_stats_fill_defaults() {
        let json = r#"{
            "users": {"total": 12, "professionals": 4},
            "services": {"total": 7, "byStatus": {"completed": 3}, "byCategory": {"moveis": 5}}
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.users.total, 12);
        assert_eq!(stats.users.clients, 0);
        assert_eq!(count_of(&stats.services.by_status, "completed"), 3);
        assert_eq!(count_of(&stats.quotes.by_status, "accepted"), 0);
        assert_eq!(stats.financials.total_revenue, 0.0);
    }
}
