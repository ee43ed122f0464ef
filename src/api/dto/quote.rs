use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::party::PartyRef;
use super::status::QuoteStatus;

/// Price proposal a professional sent for a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<PartyRef>,
    #[serde(default)]
    pub total_price: f64,
    pub status: QuoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}
