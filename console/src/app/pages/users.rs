//! # Users Page
//!
//! System accounts, activation and role links. Also home of the doctor
//! listing used to pick doctors for appointments, records and department
//! heads.

use super::detail_table;
use crate::app::forms::{self, FormFields};
use crate::app::state::Page;
use crate::app::App;
use crate::table::{filter_text, Table};
use shared::{or_dash, User, UserUpdate};

const DETAIL_FIELDS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("Username", "username"),
    ("Full name", "full_name"),
    ("Email", "email"),
    ("Phone", "phone"),
    ("Roles", "roles"),
    ("Active", "is_active"),
    ("Created", "created_at"),
];

fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

pub fn display_users(users: &[User]) -> Table {
    let mut table = Table::new("")
        .sortable("ID", "id")
        .sortable("Username", "username")
        .sortable("Full name", "full_name")
        .column("Email")
        .column("Phone")
        .column("Roles")
        .column("Status")
        .column("Actions")
        .empty_message("No users");
    for u in users {
        let action = if u.is_active {
            format!("deactivate {}", u.id)
        } else {
            format!("activate {}", u.id)
        };
        table.push_row(vec![
            u.id.to_string(),
            u.username.clone(),
            u.full_name.clone(),
            u.email.clone(),
            or_dash(u.phone.as_deref()),
            u.role_names().join(", "),
            status_label(u.is_active).to_string(),
            action,
        ]);
    }
    table
}

/// Users holding `role`, in list order
pub fn doctors(users: &[User], role: &str) -> Vec<User> {
    users.iter().filter(|u| u.has_role(role)).cloned().collect()
}

pub fn display_doctors(doctors: &[User]) -> Table {
    let mut table = Table::new("Doctors")
        .column("ID")
        .column("Full name")
        .column("Email")
        .empty_message("No doctors");
    for d in doctors {
        table.push_row(vec![d.id.to_string(), d.full_name.clone(), d.email.clone()]);
    }
    table
}

pub(crate) async fn load_users_page(app: &App) {
    app.begin_page(Page::Users);
    match app.api().list_users().await {
        Ok(users) => {
            tracing::debug!(count = users.len(), "Users loaded");
            let table = display_users(&users);
            app.state.write().cache.users = users;
            app.show_table(&table);
        }
        Err(e) => app.report("Failed to load users", &e),
    }
}

/// Matches username, full name and email
pub(crate) fn filter_users(app: &App, query: &str) {
    let filtered = filter_text(&app.state.read().cache.users, query);
    app.show_table(&display_users(&filtered));
}

pub(crate) async fn view_user(app: &App, id: i64) {
    match app.api().get_user(id).await {
        Ok(user) => {
            let title = format!("User #{}: {}", user.id, user.username);
            app.show_table(&detail_table(title, &user, DETAIL_FIELDS));
        }
        Err(e) => app.report("Failed to load user", &e),
    }
}

pub(crate) async fn list_doctors(app: &App) {
    match app.api().list_users().await {
        Ok(users) => app.show_table(&display_doctors(&doctors(&users, app.doctor_role()))),
        Err(e) => app.report("Failed to load doctors", &e),
    }
}

pub(crate) async fn create_user(app: &App, fields: FormFields) {
    let new = match forms::user_create(fields) {
        Ok(new) => new,
        Err(e) => return app.report("Cannot create user", &e),
    };
    let created = match app.api().create_user(&new.user).await {
        Ok(created) => created,
        Err(e) => return app.report("Failed to create user", &e),
    };
    app.success(format!("User created (ID {})", created.id));
    if let Some(role_id) = new.role_id {
        match app.api().assign_role(created.id, role_id).await {
            Ok(response) => app.success(response.message),
            Err(e) => app.report("User created but the role was not assigned", &e),
        }
    }
    load_users_page(app).await;
}

pub(crate) async fn update_user(app: &App, id: i64, fields: FormFields) {
    let body = match forms::user_update(fields) {
        Ok(body) => body,
        Err(e) => return app.report("Cannot update user", &e),
    };
    match app.api().update_user(id, &body).await {
        Ok(_) => {
            app.success(format!("User {} updated", id));
            load_users_page(app).await;
        }
        Err(e) => app.report("Failed to update user", &e),
    }
}

pub(crate) async fn set_user_active(app: &App, id: i64, active: bool) {
    let body = UserUpdate {
        is_active: Some(active),
        ..Default::default()
    };
    match app.api().update_user(id, &body).await {
        Ok(_) => {
            app.success(if active { "User activated" } else { "User deactivated" });
            load_users_page(app).await;
        }
        Err(e) => app.report("Failed to change user status", &e),
    }
}

pub(crate) async fn delete_user(app: &App, id: i64) {
    if !app.view().confirm(&format!("Delete user {}?", id)) {
        tracing::debug!(id, "User deletion cancelled");
        return;
    }
    match app.api().delete_user(id).await {
        Ok(response) => {
            app.success(response.message);
            load_users_page(app).await;
        }
        Err(e) => app.report("Failed to delete user", &e),
    }
}

pub(crate) async fn assign_role(app: &App, user_id: i64, role_id: i64) {
    match app.api().assign_role(user_id, role_id).await {
        Ok(response) => {
            app.success(response.message);
            load_users_page(app).await;
        }
        Err(e) => app.report("Failed to assign role", &e),
    }
}

pub(crate) async fn remove_role(app: &App, user_id: i64, role_id: i64) {
    match app.api().remove_role(user_id, role_id).await {
        Ok(response) => {
            app.success(response.message);
            load_users_page(app).await;
        }
        Err(e) => app.report("Failed to remove role", &e),
    }
}
