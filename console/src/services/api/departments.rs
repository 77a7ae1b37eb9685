//! # Department Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{Department, DepartmentCreate};

pub async fn list_departments(client: &ApiClient) -> Result<Vec<Department>> {
    client.get("/departments").await
}

pub async fn get_department(client: &ApiClient, id: i64) -> Result<Department> {
    client.get(&format!("/departments/{}", id)).await
}

pub async fn create_department(client: &ApiClient, department: &DepartmentCreate) -> Result<Department> {
    let created: Department = client.post("/departments", department).await?;
    tracing::info!(id = created.id, name = %created.name, "Department created");
    Ok(created)
}

pub async fn update_department(
    client: &ApiClient,
    id: i64,
    department: &DepartmentCreate,
) -> Result<Department> {
    client.put(&format!("/departments/{}", id), department).await
}

pub async fn delete_department(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&format!("/departments/{}", id)).await
}
