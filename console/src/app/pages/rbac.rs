//! # Access Control Page
//!
//! Roles with their permission counts, and every permission grouped by the
//! resource it guards.

use crate::app::state::Page;
use crate::app::App;
use crate::table::Table;
use shared::{or_dash, Permission, RoleWithPermissions};

pub fn display_roles(roles: &[RoleWithPermissions]) -> Table {
    let mut table = Table::new("Roles")
        .column("ID")
        .column("Role")
        .column("Description")
        .column("Priority")
        .column("Permissions")
        .empty_message("No roles");
    for r in roles {
        table.push_row(vec![
            r.role.id.to_string(),
            r.role.name.clone(),
            or_dash(r.role.description.as_deref()),
            r.role.priority.to_string(),
            r.permissions.len().to_string(),
        ]);
    }
    table
}

/// Permissions grouped by resource, resources in first-seen order
pub fn group_by_resource(permissions: &[Permission]) -> Vec<(String, Vec<&Permission>)> {
    let mut groups: Vec<(String, Vec<&Permission>)> = Vec::new();
    for p in permissions {
        match groups.iter_mut().find(|(resource, _)| *resource == p.resource) {
            Some((_, members)) => members.push(p),
            None => groups.push((p.resource.clone(), vec![p])),
        }
    }
    groups
}

pub fn display_permissions(permissions: &[Permission]) -> Table {
    let mut table = Table::new("Permissions")
        .column("Resource")
        .column("Actions")
        .empty_message("No permissions");
    for (resource, members) in group_by_resource(permissions) {
        let actions = members
            .iter()
            .map(|p| format!("{} (#{})", p.action, p.id))
            .collect::<Vec<_>>()
            .join(", ");
        table.push_row(vec![resource.to_uppercase(), actions]);
    }
    table
}

pub(crate) async fn load_rbac_page(app: &App) {
    app.begin_page(Page::Rbac);
    let api = app.api();
    match tokio::try_join!(api.list_roles(), api.list_permissions()) {
        Ok((roles, permissions)) => {
            let roles_table = display_roles(&roles);
            let permissions_table = display_permissions(&permissions);
            {
                let mut state = app.state.write();
                state.cache.roles = roles;
                state.cache.permissions = permissions;
            }
            app.show_table(&roles_table);
            app.show_table(&permissions_table);
        }
        Err(e) => app.report("Failed to load access control data", &e),
    }
}

pub(crate) async fn grant_permission(app: &App, role_id: i64, permission_id: i64) {
    match app.api().grant_permission(role_id, permission_id).await {
        Ok(response) => {
            app.success(response.message);
            load_rbac_page(app).await;
        }
        Err(e) => app.report("Failed to grant permission", &e),
    }
}

pub(crate) async fn revoke_permission(app: &App, role_id: i64, permission_id: i64) {
    match app.api().revoke_permission(role_id, permission_id).await {
        Ok(response) => {
            app.success(response.message);
            load_rbac_page(app).await;
        }
        Err(e) => app.report("Failed to revoke permission", &e),
    }
}
