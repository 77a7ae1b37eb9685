//! # Appointments Page
//!
//! Besides CRUD this page owns the status transitions. Completing or
//! cancelling is only offered while an appointment is neither completed
//! nor cancelled.

use super::detail_table;
use crate::app::forms::{self, parse_date, FormFields};
use crate::app::state::Page;
use crate::app::view::Notice;
use crate::app::App;
use crate::core::error::{AppError, Result};
use crate::table::{AppointmentFilter, Table};
use shared::{truncate_text, Appointment, AppointmentStatus, AppointmentUpdate, TEXT_PREVIEW_CHARS};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Patient ID", "patient_id"),
    ("Doctor ID", "doctor_id"),
    ("Department ID", "department_id"),
    ("Date", "appointment_date"),
    ("Time", "appointment_time"),
    ("Duration (min)", "duration_minutes"),
    ("Status", "status"),
    ("Reason", "reason"),
    ("Notes", "notes"),
    ("Created", "created_at"),
];

pub fn display_appointments(appointments: &[Appointment]) -> Table {
    let mut table = Table::new("")
        .sortable("ID", "id")
        .sortable("Date", "appointment_date")
        .column("Time")
        .column("Patient")
        .column("Doctor")
        .sortable("Status", "status")
        .column("Reason")
        .column("Actions")
        .empty_message("No appointments");
    for a in appointments {
        let actions = if a.status.is_final() {
            String::new()
        } else {
            format!("complete {0} | cancel {0}", a.id)
        };
        table.push_row(vec![
            a.id.to_string(),
            a.appointment_date.format("%Y-%m-%d").to_string(),
            a.appointment_time.format("%H:%M").to_string(),
            format!("Patient #{}", a.patient_id),
            format!("Doctor #{}", a.doctor_id),
            a.status.label().to_string(),
            a.reason
                .as_deref()
                .map(|r| truncate_text(r, TEXT_PREVIEW_CHARS))
                .unwrap_or_default(),
            actions,
        ]);
    }
    table
}

pub(crate) async fn load_appointments_page(app: &App) {
    app.begin_page(Page::Appointments);
    app.state.write().appointment_filter.clear();
    match app.api().list_appointments().await {
        Ok(appointments) => {
            tracing::debug!(count = appointments.len(), "Appointments loaded");
            let table = display_appointments(&appointments);
            app.state.write().cache.appointments = appointments;
            app.show_table(&table);
        }
        Err(e) => app.report("Failed to load appointments", &e),
    }
}

/// Fold `date=YYYY-MM-DD`, `status=<status>` and `clear` terms into `current`.
/// An empty value drops that criterion.
pub fn parse_filter_terms(current: &AppointmentFilter, terms: &[String]) -> Result<AppointmentFilter> {
    let mut filter = current.clone();
    for term in terms {
        let term = term.trim();
        if term.eq_ignore_ascii_case("clear") {
            filter.clear();
            continue;
        }
        match term.split_once('=') {
            Some(("date", "")) => filter.date = None,
            Some(("date", raw)) => filter.date = Some(parse_date(raw)?),
            Some(("status", "")) => filter.status = None,
            Some(("status", raw)) => {
                filter.status = Some(raw.parse::<AppointmentStatus>().map_err(AppError::InvalidInput)?)
            }
            _ => {
                return Err(AppError::InvalidInput(format!(
                    "expected date=YYYY-MM-DD, status=<status> or clear, got '{}'",
                    term
                )))
            }
        }
    }
    Ok(filter)
}

/// Filter the cached list (fetch order) by date and status
pub(crate) fn apply_appointment_filters(app: &App, terms: &[String]) {
    let current = app.state.read().appointment_filter.clone();
    let filter = match parse_filter_terms(&current, terms) {
        Ok(filter) => filter,
        Err(e) => return app.report("Cannot filter appointments", &e),
    };
    let filtered = {
        let mut state = app.state.write();
        state.appointment_filter = filter;
        state.appointment_filter.apply(&state.cache.appointments)
    };
    app.show_table(&display_appointments(&filtered));
}

pub(crate) async fn view_appointment(app: &App, id: i64) {
    match app.api().get_appointment(id).await {
        Ok(appointment) => {
            let title = format!("Appointment #{}", appointment.id);
            app.show_table(&detail_table(title, &appointment, DETAIL_FIELDS));
        }
        Err(e) => app.report("Failed to load appointment", &e),
    }
}

pub(crate) async fn create_appointment(app: &App, fields: FormFields) {
    let body = match forms::appointment_create(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot create appointment", &e),
    };
    match app.api().create_appointment(&body).await {
        Ok(created) => {
            app.success(format!("Appointment created (ID {})", created.id));
            load_appointments_page(app).await;
        }
        Err(e) => app.report("Failed to create appointment", &e),
    }
}

pub(crate) async fn update_appointment(app: &App, id: i64, fields: FormFields) {
    let body = match forms::appointment_update(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot update appointment", &e),
    };
    match app.api().update_appointment(id, &body).await {
        Ok(_) => {
            app.success(format!("Appointment {} updated", id));
            load_appointments_page(app).await;
        }
        Err(e) => app.report("Failed to update appointment", &e),
    }
}

/// Known-final appointments are refused locally; unknown ids go to the backend.
fn ensure_open(app: &App, id: i64) -> bool {
    let status = app.state.read().cache.appointment(id).map(|a| a.status);
    match status {
        Some(status) if status.is_final() => {
            app.view().notify(Notice::Error(format!(
                "Appointment {} is already {}",
                id,
                status.label().to_lowercase()
            )));
            false
        }
        _ => true,
    }
}

pub(crate) async fn set_appointment_status(app: &App, id: i64, status: AppointmentStatus) {
    if !app.require_auth() {
        return;
    }
    match app
        .api()
        .update_appointment(id, &AppointmentUpdate::status(status))
        .await
    {
        Ok(_) => {
            app.success(format!("Appointment {} is now {}", id, status.label().to_lowercase()));
            load_appointments_page(app).await;
        }
        Err(e) => app.report("Failed to update status", &e),
    }
}

pub(crate) async fn complete_appointment(app: &App, id: i64) {
    if !app.require_auth() || !ensure_open(app, id) {
        return;
    }
    set_appointment_status(app, id, AppointmentStatus::Completed).await;
}

pub(crate) async fn cancel_appointment(app: &App, id: i64) {
    if !app.require_auth() || !ensure_open(app, id) {
        return;
    }
    if !app.view().confirm(&format!("Cancel appointment {}?", id)) {
        tracing::debug!(id, "Cancellation aborted");
        return;
    }
    set_appointment_status(app, id, AppointmentStatus::Cancelled).await;
}

pub(crate) async fn delete_appointment(app: &App, id: i64) {
    if !app.view().confirm(&format!("Delete appointment {}?", id)) {
        tracing::debug!(id, "Appointment deletion cancelled");
        return;
    }
    match app.api().delete_appointment(id).await {
        Ok(response) => {
            app.success(response.message);
            load_appointments_page(app).await;
        }
        Err(e) => app.report("Failed to delete appointment", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{appointment, date};

    #[test]
    fn test_actions_hidden_for_final_statuses() {
        let list = vec![
            appointment(1, date(2024, 1, 2), AppointmentStatus::Scheduled),
            appointment(2, date(2024, 1, 2), AppointmentStatus::Completed),
            appointment(3, date(2024, 1, 2), AppointmentStatus::Cancelled),
        ];
        let table = display_appointments(&list);
        assert_eq!(table.cell(0, "Actions"), Some("complete 1 | cancel 1"));
        assert_eq!(table.cell(1, "Actions"), Some(""));
        assert_eq!(table.cell(2, "Actions"), Some(""));
        assert_eq!(table.cell(1, "Status"), Some("Completed"));
    }

    #[test]
    fn test_reason_is_truncated() {
        let mut a = appointment(1, date(2024, 1, 2), AppointmentStatus::Scheduled);
        a.reason = Some("x".repeat(60));
        let table = display_appointments(&[a]);
        let reason = table.cell(0, "Reason").unwrap();
        assert_eq!(reason, format!("{}...", "x".repeat(50)));
    }

    #[test]
    fn test_time_and_party_columns() {
        let table = display_appointments(&[appointment(5, date(2024, 3, 1), AppointmentStatus::Confirmed)]);
        assert_eq!(table.cell(0, "Time"), Some("10:00"));
        assert_eq!(table.cell(0, "Patient"), Some("Patient #1"));
        assert_eq!(table.cell(0, "Doctor"), Some("Doctor #2"));
        assert_eq!(table.sort_keys(), vec!["id", "appointment_date", "status"]);
    }

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_filter_terms_accumulate_and_clear() {
        let filter = parse_filter_terms(&AppointmentFilter::default(), &terms(&["date=2024-01-02"])).unwrap();
        assert_eq!(filter.date, Some(date(2024, 1, 2)));

        let filter = parse_filter_terms(&filter, &terms(&["status=completed"])).unwrap();
        assert_eq!(filter.date, Some(date(2024, 1, 2)));
        assert_eq!(filter.status, Some(AppointmentStatus::Completed));

        let filter = parse_filter_terms(&filter, &terms(&["date="])).unwrap();
        assert_eq!(filter.date, None);

        let filter = parse_filter_terms(&filter, &terms(&["clear"])).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_filter_terms_reject_garbage() {
        let base = AppointmentFilter::default();
        assert!(parse_filter_terms(&base, &terms(&["date=02.01.2024"])).is_err());
        assert!(parse_filter_terms(&base, &terms(&["status=later"])).is_err());
        assert!(parse_filter_terms(&base, &terms(&["doctor=2"])).is_err());
    }
}
