//! # Dataset Cache
//!
//! Most recently fetched list per entity type. Every slot is replaced
//! wholesale by its page loader; nothing patches it in place.

use shared::{Appointment, Department, MedicalRecord, Patient, Permission, RoleWithPermissions, User};

#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub medical_records: Vec<MedicalRecord>,
    pub users: Vec<User>,
    pub departments: Vec<Department>,
    pub roles: Vec<RoleWithPermissions>,
    pub permissions: Vec<Permission>,
}

impl DatasetCache {
    pub fn appointment(&self, id: i64) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Drop everything, e.g. when the session ends
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
