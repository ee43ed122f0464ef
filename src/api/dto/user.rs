//! Marketplace account records

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::status::UserRole;

fn default_true() -> bool {
    true
}

/// Account as returned by `/users` and `/auth/login`.
///
/// Also the shape persisted under the `user` key of the credential store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decodes_backend_shape() {
        let json = r#"{
            "_id": "65f1",
            "name": "Maria Souza",
            "email": "maria@email.com",
            "role": "client",
            "isVerified": true,
            "isActive": false,
            "createdAt": "2024-03-10T14:00:00.000Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "65f1");
        assert_eq!(user.role, UserRole::Client);
        assert!(user.is_verified);
        assert!(!user.is_active);
        assert!(user.created_at.is_some());
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_user_accepts_plain_id_and_minimal_fields() {
        let json = r#"{"id": "1", "name": "Admin", "email": "admin@x.com", "role": "admin"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert!(user.is_active);
    }
}
