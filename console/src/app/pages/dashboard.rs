//! # Dashboard
//!
//! Fan-out over patients, appointments, records, users and the caller's
//! own permissions. Only one figure is derived locally: how many
//! appointments fall on today's date in the local timezone.

use crate::app::state::Page;
use crate::app::App;
use crate::table::{render_empty_state, render_stats_summary, Table};
use chrono::{Local, NaiveDate};
use shared::{Appointment, Permission};

/// Entries in the recent-appointments panel
pub const RECENT_APPOINTMENTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub total_patients: usize,
    pub today_appointments: usize,
    pub total_records: usize,
    pub total_users: usize,
    pub recent: Vec<Appointment>,
    pub permissions: Vec<String>,
}

impl Dashboard {
    pub fn build(
        patients: usize,
        appointments: &[Appointment],
        records: usize,
        users: usize,
        permissions: &[Permission],
        today: NaiveDate,
    ) -> Self {
        Self {
            total_patients: patients,
            today_appointments: count_today(appointments, today),
            total_records: records,
            total_users: users,
            recent: appointments.iter().take(RECENT_APPOINTMENTS).cloned().collect(),
            permissions: permissions
                .iter()
                .map(|p| p.description.clone().unwrap_or_else(|| p.name.clone()))
                .collect(),
        }
    }

    pub fn recent_table(&self) -> Table {
        let mut table = Table::new("Recent appointments")
            .column("Patient")
            .column("Date")
            .column("Time")
            .column("Status")
            .empty_message("No appointments");
        for a in &self.recent {
            table.push_row(vec![
                format!("Patient ID: {}", a.patient_id),
                a.appointment_date.format("%Y-%m-%d").to_string(),
                a.appointment_time.format("%H:%M").to_string(),
                a.status.to_string(),
            ]);
        }
        table
    }

    pub fn render_text(&self) -> String {
        let mut out = render_stats_summary(&[
            ("Patients", self.total_patients),
            ("Today's appointments", self.today_appointments),
            ("Medical records", self.total_records),
            ("Users", self.total_users),
        ]);
        out.push_str("\n\n");
        out.push_str(&self.recent_table().render_text(None));
        out.push_str("\nMy permissions\n");
        if self.permissions.is_empty() {
            out.push_str(&render_empty_state("No permissions", None));
        } else {
            for p in &self.permissions {
                out.push_str(&format!("  - {}\n", p));
            }
        }
        out
    }
}

/// Appointments scheduled on `today`
pub fn count_today(appointments: &[Appointment], today: NaiveDate) -> usize {
    appointments
        .iter()
        .filter(|a| a.appointment_date == today)
        .count()
}

pub(crate) async fn load_dashboard(app: &App) {
    app.begin_page(Page::Dashboard);
    let api = app.api();
    let counts = tokio::try_join!(
        api.list_patients(),
        api.list_appointments(),
        api.list_medical_records(),
        api.list_users(),
    );
    let (patients, appointments, records, users) = match counts {
        Ok(lists) => lists,
        Err(e) => return app.report("Failed to load dashboard statistics", &e),
    };

    // Statistics still show when only the permission list fails
    let permissions = api.my_permissions().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load permissions");
        Vec::new()
    });

    let dashboard = Dashboard::build(
        patients.len(),
        &appointments,
        records.len(),
        users.len(),
        &permissions,
        Local::now().date_naive(),
    );
    tracing::debug!(
        patients = dashboard.total_patients,
        today = dashboard.today_appointments,
        "Dashboard loaded"
    );
    app.view().show_dashboard(&dashboard);
}
