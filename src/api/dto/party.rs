use serde::{Deserialize, Serialize};

/// Reference to another record that the backend may or may not populate.
///
/// `clientId`, `professionalId` and `serviceId` arrive either as a bare id
/// or as the embedded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    Id(String),
    Populated(PartySummary),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PartySummary {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl PartyRef {
    /// Human-readable label, only available when the record was populated.
    pub fn label(&self) -> Option<&str> {
        match self {
            PartyRef::Id(_) => None,
            PartyRef::Populated(summary) => summary
                .name
                .as_deref()
                .or(summary.title.as_deref())
                .filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            PartyRef::Id(id) => Some(id),
            PartyRef::Populated(summary) => summary.id.as_deref(),
        }
    }
}

/// Label of an optional reference, or `fallback` when absent or unpopulated.
pub fn label_or<'a>(party: Option<&'a PartyRef>, fallback: &'a str) -> &'a str {
    party.and_then(PartyRef::label).unwrap_or(fallback)
}
