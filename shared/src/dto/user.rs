use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::rbac::Role;

/// Staff account as returned by `/users` and `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Role names in the order the backend returned them.
    pub fn role_names(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.name.as_str()).collect()
    }

    /// Whether the user holds a role with the given name.
    pub fn has_role(&self, role_name: &str) -> bool {
        self.roles.iter().any(|r| r.name == role_name)
    }
}

/// Create user request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Partial user update; only `Some` fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_roles_default_to_empty() {
        let json = r#"{
            "id": 4,
            "username": "registrar",
            "email": "registrar@clinic.ua",
            "full_name": "Сидоренко Олена Миколаївна",
            "is_active": true,
            "created_at": "2024-01-01T09:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.phone.is_none());
        assert!(!user.has_role("Лікар"));
    }

    #[test]
    fn test_activation_toggle_serializes_single_field() {
        let update = UserUpdate {
            is_active: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"is_active":false}"#);
    }
}
