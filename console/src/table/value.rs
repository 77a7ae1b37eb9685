//! # Field Values
//!
//! The sort and filter engine never looks at entity structs directly. It
//! asks a [`Record`] for the value of a named column and works on the
//! resulting [`FieldValue`]. A column the record does not have reads as
//! [`FieldValue::Null`], the same as an absent optional field.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use shared::{Appointment, Department, MedicalRecord, Patient, Permission, RoleWithPermissions, User};
use std::cmp::Ordering;
use std::fmt;

/// Runtime value of one column
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Ordering of two present values.
    ///
    /// Text compares case-insensitively, numbers numerically (integers and
    /// floats mix), everything else by its native ordering. Values of
    /// different kinds fall back to comparing their lowercased display text.
    pub fn compare_present(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Text(a), Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Integer(a), Float(b)) => (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal),
            (Float(a), Integer(b)) => a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal),
            (Float(a), Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Bool(a), Bool(b)) => a.cmp(b),
            (Date(a), Date(b)) => a.cmp(b),
            (Time(a), Time(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (a, b) => a.to_string().to_lowercase().cmp(&b.to_string().to_lowercase()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Text(v) => f.write_str(v),
            FieldValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            FieldValue::Time(v) => write!(f, "{}", v.format("%H:%M:%S")),
            FieldValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Integer(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Integer(v.into())
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<NaiveTime> for FieldValue {
    fn from(v: NaiveTime) -> Self {
        FieldValue::Time(v)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(v: NaiveDateTime) -> Self {
        FieldValue::DateTime(v)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<&Value> for FieldValue {
    fn from(v: &Value) -> Self {
        match v {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

/// Anything the engine can read columns from
pub trait Record {
    /// Value of column `name`, `Null` when absent
    fn field(&self, name: &str) -> FieldValue;
}

impl Record for Patient {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "first_name" => (&self.first_name).into(),
            "last_name" => (&self.last_name).into(),
            "middle_name" => self.middle_name.as_ref().into(),
            "birth_date" => self.birth_date.into(),
            "gender" => self.gender.as_ref().into(),
            "phone" => (&self.phone).into(),
            "email" => self.email.as_ref().into(),
            "address" => self.address.as_ref().into(),
            "insurance_number" => self.insurance_number.as_ref().into(),
            "blood_type" => self.blood_type.as_ref().into(),
            "allergies" => self.allergies.as_ref().into(),
            "chronic_diseases" => self.chronic_diseases.as_ref().into(),
            "emergency_contact" => self.emergency_contact.as_ref().into(),
            "emergency_phone" => self.emergency_phone.as_ref().into(),
            "is_active" => self.is_active.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Appointment {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "patient_id" => self.patient_id.into(),
            "doctor_id" => self.doctor_id.into(),
            "department_id" => self.department_id.into(),
            "appointment_date" => self.appointment_date.into(),
            "appointment_time" => self.appointment_time.into(),
            "duration_minutes" => self.duration_minutes.into(),
            "reason" => self.reason.as_ref().into(),
            "notes" => self.notes.as_ref().into(),
            "status" => self.status.as_str().into(),
            "created_by_id" => self.created_by_id.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for MedicalRecord {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "patient_id" => self.patient_id.into(),
            "appointment_id" => self.appointment_id.into(),
            "doctor_id" => self.doctor_id.into(),
            "diagnosis" => (&self.diagnosis).into(),
            "symptoms" => self.symptoms.as_ref().into(),
            "treatment" => self.treatment.as_ref().into(),
            "prescriptions" => self.prescriptions.as_ref().into(),
            "lab_results" => self.lab_results.as_ref().into(),
            "notes" => self.notes.as_ref().into(),
            "is_confidential" => self.is_confidential.into(),
            "visit_date" => self.visit_date.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for User {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "username" => (&self.username).into(),
            "email" => (&self.email).into(),
            "full_name" => (&self.full_name).into(),
            "phone" => self.phone.as_ref().into(),
            "is_active" => self.is_active.into(),
            "created_at" => self.created_at.into(),
            "roles" => FieldValue::Text(self.role_names().join(", ")),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Department {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "description" => self.description.as_ref().into(),
            "phone" => self.phone.as_ref().into(),
            "floor" => self.floor.into(),
            "capacity" => self.capacity.into(),
            "head_doctor_id" => self.head_doctor_id.into(),
            "is_active" => self.is_active.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Record for RoleWithPermissions {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.role.id.into(),
            "name" => (&self.role.name).into(),
            "description" => self.role.description.as_ref().into(),
            "priority" => self.role.priority.into(),
            "created_at" => self.role.created_at.into(),
            "permissions" => FieldValue::Integer(self.permissions.len() as i64),
            _ => FieldValue::Null,
        }
    }
}

impl Record for Permission {
    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.into(),
            "name" => (&self.name).into(),
            "description" => self.description.as_ref().into(),
            "resource" => (&self.resource).into(),
            "action" => (&self.action).into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

/// Raw JSON rows: objects expose their keys, anything else has no columns.
impl Record for Value {
    fn field(&self, name: &str) -> FieldValue {
        self.get(name).map(FieldValue::from).unwrap_or(FieldValue::Null)
    }
}
