use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hospital department
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub head_doctor_id: Option<i64>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Create department request. Also used as the full-replacement body of
/// `PUT /departments/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_doctor_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassigned_head_doctor_is_omitted() {
        let create = DepartmentCreate {
            name: "Кардіологія".to_string(),
            floor: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_value(&create).unwrap();
        assert!(json.get("head_doctor_id").is_none());
        assert_eq!(json["floor"], 2);
    }
}
