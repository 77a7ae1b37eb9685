//! # Departments Page

use super::detail_table;
use crate::app::forms::{self, FormFields};
use crate::app::state::Page;
use crate::app::App;
use crate::table::Table;
use shared::{or_dash, Department};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Name", "name"),
    ("Description", "description"),
    ("Phone", "phone"),
    ("Floor", "floor"),
    ("Capacity", "capacity"),
    ("Head doctor ID", "head_doctor_id"),
    ("Active", "is_active"),
    ("Created", "created_at"),
];

pub fn display_departments(departments: &[Department]) -> Table {
    let mut table = Table::new("")
        .sortable("ID", "id")
        .sortable("Name", "name")
        .column("Description")
        .column("Head doctor")
        .column("Phone")
        .empty_message("No departments");
    for d in departments {
        table.push_row(vec![
            d.id.to_string(),
            d.name.clone(),
            or_dash(d.description.as_deref()),
            d.head_doctor_id
                .map(|id| format!("Doctor #{}", id))
                .unwrap_or_else(|| "Not assigned".to_string()),
            or_dash(d.phone.as_deref()),
        ]);
    }
    table
}

pub(crate) async fn load_departments_page(app: &App) {
    app.begin_page(Page::Departments);
    match app.api().list_departments().await {
        Ok(departments) => {
            tracing::debug!(count = departments.len(), "Departments loaded");
            let table = display_departments(&departments);
            app.state.write().cache.departments = departments;
            app.show_table(&table);
        }
        Err(e) => app.report("Failed to load departments", &e),
    }
}

pub(crate) async fn view_department(app: &App, id: i64) {
    match app.api().get_department(id).await {
        Ok(department) => {
            let title = format!("Department #{}: {}", department.id, department.name);
            app.show_table(&detail_table(title, &department, DETAIL_FIELDS));
        }
        Err(e) => app.report("Failed to load department", &e),
    }
}

pub(crate) async fn create_department(app: &App, fields: FormFields) {
    let body = match forms::department_create(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot create department", &e),
    };
    match app.api().create_department(&body).await {
        Ok(created) => {
            app.success(format!("Department created (ID {})", created.id));
            load_departments_page(app).await;
        }
        Err(e) => app.report("Failed to create department", &e),
    }
}

/// `PUT /departments/{id}` replaces the record, so the form needs `name`.
pub(crate) async fn update_department(app: &App, id: i64, fields: FormFields) {
    let body = match forms::department_create(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot update department", &e),
    };
    match app.api().update_department(id, &body).await {
        Ok(_) => {
            app.success(format!("Department {} updated", id));
            load_departments_page(app).await;
        }
        Err(e) => app.report("Failed to update department", &e),
    }
}

pub(crate) async fn delete_department(app: &App, id: i64) {
    if !app.view().confirm(&format!("Delete department {}?", id)) {
        tracing::debug!(id, "Department deletion cancelled");
        return;
    }
    match app.api().delete_department(id).await {
        Ok(()) => {
            app.success("Department deleted");
            load_departments_page(app).await;
        }
        Err(e) => app.report("Failed to delete department", &e),
    }
}
