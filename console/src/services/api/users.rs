//! # User Endpoints
//!
//! Staff accounts, activation toggling and role links.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{MessageResponse, User, UserCreate, UserUpdate};

pub async fn list_users(client: &ApiClient) -> Result<Vec<User>> {
    client.get("/users").await
}

pub async fn get_user(client: &ApiClient, id: i64) -> Result<User> {
    client.get(&format!("/users/{}", id)).await
}

#[tracing::instrument(skip(client, user), fields(username = %user.username))]
pub async fn create_user(client: &ApiClient, user: &UserCreate) -> Result<User> {
    let created: User = client.post("/users", user).await?;
    tracing::info!(id = created.id, "User created");
    Ok(created)
}

pub async fn update_user(client: &ApiClient, id: i64, update: &UserUpdate) -> Result<User> {
    client.put(&format!("/users/{}", id), update).await
}

pub async fn delete_user(client: &ApiClient, id: i64) -> Result<MessageResponse> {
    let response: MessageResponse = client.delete_with(&format!("/users/{}", id)).await?;
    tracing::info!(id, "User deleted");
    Ok(response)
}

pub async fn assign_role(client: &ApiClient, user_id: i64, role_id: i64) -> Result<MessageResponse> {
    client
        .post_empty(&format!("/users/{}/roles/{}", user_id, role_id))
        .await
}

pub async fn remove_role(client: &ApiClient, user_id: i64, role_id: i64) -> Result<MessageResponse> {
    client
        .delete_with(&format!("/users/{}/roles/{}", user_id, role_id))
        .await
}
