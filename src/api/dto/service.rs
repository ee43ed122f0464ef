use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::party::PartyRef;
use super::status::{ServiceCategory, ServiceStatus};

/// Service request posted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: ServiceCategory,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}
