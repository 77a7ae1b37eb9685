use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role as embedded in user payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: i32,
    pub created_at: NaiveDateTime,
}

/// Single permission (`resource.action`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resource: String,
    pub action: String,
    pub created_at: NaiveDateTime,
}

/// Role with its granted permissions, as returned by `/rbac/roles`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_with_permissions_flattens_role_fields() {
        let json = r#"{
            "id": 2,
            "name": "Лікар",
            "description": "Doctor",
            "priority": 50,
            "created_at": "2024-01-01T00:00:00",
            "permissions": [
                {"id": 1, "name": "patients.read", "resource": "patients", "action": "read",
                 "created_at": "2024-01-01T00:00:00"}
            ]
        }"#;
        let role: RoleWithPermissions = serde_json::from_str(json).unwrap();
        assert_eq!(role.role.name, "Лікар");
        assert_eq!(role.role.priority, 50);
        assert_eq!(role.permissions.len(), 1);
        assert_eq!(role.permissions[0].resource, "patients");
    }
}
