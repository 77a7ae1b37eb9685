//! # Local Filters
//!
//! Filters run over the in-memory dataset cache and never hit the network.

use chrono::NaiveDate;
use shared::{Appointment, AppointmentStatus, MedicalRecord, Patient, User};

/// Entity with a fixed set of text fields searched by the live filter
pub trait Searchable {
    fn search_fields(&self) -> Vec<Option<&str>>;

    fn matches(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

impl Searchable for Patient {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.first_name.as_str()),
            Some(self.last_name.as_str()),
            Some(self.phone.as_str()),
            self.email.as_deref(),
        ]
    }
}

impl Searchable for MedicalRecord {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.diagnosis.as_str()), self.treatment.as_deref()]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.username.as_str()),
            Some(self.full_name.as_str()),
            Some(self.email.as_str()),
        ]
    }
}

/// Case-insensitive substring filter. An empty query keeps everything;
/// whitespace is part of the query.
pub fn filter_text<T>(items: &[T], query: &str) -> Vec<T>
where
    T: Searchable + Clone,
{
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| item.matches(&needle)).cloned().collect()
}

/// Exact date and status filters of the appointments page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.status.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn accepts(&self, appointment: &Appointment) -> bool {
        self.date.is_none_or(|d| appointment.appointment_date == d)
            && self.status.is_none_or(|s| appointment.status == s)
    }

    pub fn apply(&self, appointments: &[Appointment]) -> Vec<Appointment> {
        appointments
            .iter()
            .filter(|a| self.accepts(a))
            .cloned()
            .collect()
    }
}
