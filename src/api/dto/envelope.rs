use serde::{Deserialize, Serialize};

/// Wrapper the backend puts around every payload: `{ success, data, message }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// An explicit `success: false` marks a failure even on a 2xx status.
    pub fn is_failure(&self) -> bool {
        self.success == Some(false)
    }
}
