//! # Medical Records Page

use super::detail_table;
use crate::app::forms::{self, FormFields};
use crate::app::state::Page;
use crate::app::App;
use crate::table::{filter_text, Table};
use shared::{truncate_text, MedicalRecord, TEXT_PREVIEW_CHARS};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Patient ID", "patient_id"),
    ("Doctor ID", "doctor_id"),
    ("Appointment ID", "appointment_id"),
    ("Visit date", "visit_date"),
    ("Diagnosis", "diagnosis"),
    ("Symptoms", "symptoms"),
    ("Treatment", "treatment"),
    ("Prescriptions", "prescriptions"),
    ("Lab results", "lab_results"),
    ("Notes", "notes"),
    ("Confidential", "is_confidential"),
];

pub fn display_medical_records(records: &[MedicalRecord]) -> Table {
    let mut table = Table::new("")
        .sortable("ID", "id")
        .column("Patient")
        .column("Doctor")
        .sortable("Diagnosis", "diagnosis")
        .column("Treatment")
        .sortable("Visit date", "visit_date")
        .empty_message("No medical records");
    for r in records {
        table.push_row(vec![
            r.id.to_string(),
            format!("Patient #{}", r.patient_id),
            format!("Doctor #{}", r.doctor_id),
            r.diagnosis.clone(),
            r.treatment
                .as_deref()
                .map(|t| truncate_text(t, TEXT_PREVIEW_CHARS))
                .unwrap_or_default(),
            r.visit_date.format("%Y-%m-%d").to_string(),
        ]);
    }
    table
}

pub(crate) async fn load_medical_records_page(app: &App) {
    app.begin_page(Page::MedicalRecords);
    match app.api().list_medical_records().await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "Medical records loaded");
            let table = display_medical_records(&records);
            app.state.write().cache.medical_records = records;
            app.show_table(&table);
        }
        Err(e) => app.report("Failed to load medical records", &e),
    }
}

/// Matches diagnosis and treatment
pub(crate) fn filter_medical_records(app: &App, query: &str) {
    let filtered = filter_text(&app.state.read().cache.medical_records, query);
    app.show_table(&display_medical_records(&filtered));
}

pub(crate) async fn view_medical_record(app: &App, id: i64) {
    match app.api().get_medical_record(id).await {
        Ok(record) => {
            let title = format!("Medical record #{}", record.id);
            app.show_table(&detail_table(title, &record, DETAIL_FIELDS));
        }
        Err(e) => app.report("Failed to load medical record", &e),
    }
}

pub(crate) async fn create_medical_record(app: &App, fields: FormFields) {
    let body = match forms::medical_record_create(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot add medical record", &e),
    };
    match app.api().create_medical_record(&body).await {
        Ok(created) => {
            app.success(format!("Medical record added (ID {})", created.id));
            load_medical_records_page(app).await;
        }
        Err(e) => app.report("Failed to add medical record", &e),
    }
}

pub(crate) async fn update_medical_record(app: &App, id: i64, fields: FormFields) {
    let body = match forms::medical_record_update(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot update medical record", &e),
    };
    match app.api().update_medical_record(id, &body).await {
        Ok(_) => {
            app.success(format!("Medical record {} updated", id));
            load_medical_records_page(app).await;
        }
        Err(e) => app.report("Failed to update medical record", &e),
    }
}

pub(crate) async fn delete_medical_record(app: &App, id: i64) {
    if !app.view().confirm(&format!("Delete medical record {}?", id)) {
        tracing::debug!(id, "Medical record deletion cancelled");
        return;
    }
    match app.api().delete_medical_record(id).await {
        Ok(response) => {
            app.success(response.message);
            load_medical_records_page(app).await;
        }
        Err(e) => app.report("Failed to delete medical record", &e),
    }
}
