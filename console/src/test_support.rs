//! Fixtures for unit tests.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use shared::{
    Appointment, AppointmentStatus, Department, MedicalRecord, Patient, Permission, Role,
    RoleWithPermissions, User,
};

pub fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn patient(id: i64, first: &str, last: &str, phone: &str, email: Option<&str>) -> Patient {
    Patient {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        middle_name: None,
        birth_date: date(1990, 5, 1),
        gender: None,
        phone: phone.to_string(),
        email: email.map(str::to_string),
        address: None,
        insurance_number: None,
        blood_type: None,
        allergies: None,
        chronic_diseases: None,
        emergency_contact: None,
        emergency_phone: None,
        is_active: true,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn appointment(id: i64, on: NaiveDate, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        patient_id: 1,
        doctor_id: 2,
        department_id: None,
        appointment_date: on,
        appointment_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        duration_minutes: 30,
        reason: None,
        notes: None,
        status,
        created_by_id: None,
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn record(id: i64, diagnosis: &str, treatment: Option<&str>) -> MedicalRecord {
    MedicalRecord {
        id,
        patient_id: 1,
        appointment_id: None,
        doctor_id: 2,
        diagnosis: diagnosis.to_string(),
        symptoms: None,
        treatment: treatment.map(str::to_string),
        prescriptions: None,
        lab_results: None,
        notes: None,
        is_confidential: false,
        visit_date: ts(),
        created_at: ts(),
        updated_at: ts(),
    }
}

pub fn role(id: i64, name: &str) -> Role {
    Role {
        id,
        name: name.to_string(),
        description: None,
        priority: 10,
        created_at: ts(),
    }
}

pub fn user(id: i64, username: &str, roles: &[&str]) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{}@clinic.test", username),
        full_name: format!("{} Full", username),
        phone: None,
        is_active: true,
        created_at: ts(),
        roles: roles
            .iter()
            .enumerate()
            .map(|(i, name)| role(i as i64 + 1, name))
            .collect(),
    }
}

pub fn department(id: i64, name: &str) -> Department {
    Department {
        id,
        name: name.to_string(),
        description: None,
        phone: None,
        floor: None,
        capacity: None,
        head_doctor_id: None,
        is_active: true,
        created_at: ts(),
    }
}

pub fn permission(id: i64, resource: &str, action: &str) -> Permission {
    Permission {
        id,
        name: format!("{}:{}", resource, action),
        description: Some(format!("{} {}", action, resource)),
        resource: resource.to_string(),
        action: action.to_string(),
        created_at: ts(),
    }
}

pub fn role_with(id: i64, name: &str, permissions: Vec<Permission>) -> RoleWithPermissions {
    RoleWithPermissions {
        role: role(id, name),
        permissions,
    }
}
