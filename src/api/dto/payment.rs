use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::party::PartyRef;
use super::status::PaymentStatus;

/// Payment transaction between a client and a professional.
///
/// `platform_fee` is the marketplace commission; `net_amount` is what the
/// professional receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<PartyRef>,
    pub amount: f64,
    #[serde(default)]
    pub platform_fee: f64,
    #[serde(default)]
    pub net_amount: f64,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<PartyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

impl Transaction {
    /// First eight characters of the id, as shown in the transaction column.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }
}
