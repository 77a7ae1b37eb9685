//! # Access-Control Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{MessageResponse, Permission, RoleWithPermissions};

pub async fn list_roles(client: &ApiClient) -> Result<Vec<RoleWithPermissions>> {
    client.get("/rbac/roles").await
}

pub async fn list_permissions(client: &ApiClient) -> Result<Vec<Permission>> {
    client.get("/rbac/permissions").await
}

/// Permissions granted to the token holder through all of their roles
pub async fn my_permissions(client: &ApiClient) -> Result<Vec<Permission>> {
    client.get("/rbac/my-permissions").await
}

pub async fn grant_permission(
    client: &ApiClient,
    role_id: i64,
    permission_id: i64,
) -> Result<MessageResponse> {
    client
        .post_empty(&format!("/rbac/roles/{}/permissions/{}", role_id, permission_id))
        .await
}

pub async fn revoke_permission(
    client: &ApiClient,
    role_id: i64,
    permission_id: i64,
) -> Result<MessageResponse> {
    client
        .delete_with(&format!("/rbac/roles/{}/permissions/{}", role_id, permission_id))
        .await
}
