//! # Patients Page

use super::detail_table;
use crate::app::forms::{self, FormFields};
use crate::app::state::Page;
use crate::app::App;
use crate::table::{filter_text, Table};
use shared::{or_dash, Patient};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Last name", "last_name"),
    ("First name", "first_name"),
    ("Middle name", "middle_name"),
    ("Birth date", "birth_date"),
    ("Gender", "gender"),
    ("Phone", "phone"),
    ("Email", "email"),
    ("Address", "address"),
    ("Insurance number", "insurance_number"),
    ("Blood type", "blood_type"),
    ("Allergies", "allergies"),
    ("Chronic diseases", "chronic_diseases"),
    ("Emergency contact", "emergency_contact"),
    ("Emergency phone", "emergency_phone"),
    ("Active", "is_active"),
    ("Created", "created_at"),
];

pub fn display_patients(patients: &[Patient]) -> Table {
    let mut table = Table::new("")
        .sortable("ID", "id")
        .sortable("Full name", "last_name")
        .sortable("Birth date", "birth_date")
        .column("Phone")
        .column("Email")
        .column("Blood type")
        .empty_message("No patients");
    for p in patients {
        table.push_row(vec![
            p.id.to_string(),
            p.full_name(),
            p.birth_date.format("%Y-%m-%d").to_string(),
            p.phone.clone(),
            or_dash(p.email.as_deref()),
            or_dash(p.blood_type.as_deref()),
        ]);
    }
    table
}

pub(crate) async fn load_patients_page(app: &App) {
    app.begin_page(Page::Patients);
    match app.api().list_patients().await {
        Ok(patients) => {
            tracing::debug!(count = patients.len(), "Patients loaded");
            let table = display_patients(&patients);
            app.state.write().cache.patients = patients;
            app.show_table(&table);
        }
        Err(e) => app.report("Failed to load patients", &e),
    }
}

/// Matches first name, last name, phone and email
pub(crate) fn filter_patients(app: &App, query: &str) {
    let filtered = filter_text(&app.state.read().cache.patients, query);
    app.show_table(&display_patients(&filtered));
}

pub(crate) async fn view_patient(app: &App, id: i64) {
    match app.api().get_patient(id).await {
        Ok(patient) => {
            let title = format!("Patient #{}: {}", patient.id, patient.full_name());
            app.show_table(&detail_table(title, &patient, DETAIL_FIELDS));
        }
        Err(e) => app.report("Failed to load patient", &e),
    }
}

pub(crate) async fn create_patient(app: &App, fields: FormFields) {
    let body = match forms::patient_create(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot add patient", &e),
    };
    match app.api().create_patient(&body).await {
        Ok(created) => {
            app.success(format!("Patient added (ID {})", created.id));
            load_patients_page(app).await;
        }
        Err(e) => app.report("Failed to add patient", &e),
    }
}

pub(crate) async fn update_patient(app: &App, id: i64, fields: FormFields) {
    let body = match forms::patient_update(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot update patient", &e),
    };
    match app.api().update_patient(id, &body).await {
        Ok(_) => {
            app.success(format!("Patient {} updated", id));
            load_patients_page(app).await;
        }
        Err(e) => app.report("Failed to update patient", &e),
    }
}

pub(crate) async fn delete_patient(app: &App, id: i64) {
    if !app.view().confirm(&format!("Delete patient {}?", id)) {
        tracing::debug!(id, "Patient deletion cancelled");
        return;
    }
    match app.api().delete_patient(id).await {
        Ok(()) => {
            app.success("Patient deleted");
            load_patients_page(app).await;
        }
        Err(e) => app.report("Failed to delete patient", &e),
    }
}
