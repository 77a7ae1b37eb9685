//! # Patient Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{Patient, PatientCreate, PatientUpdate};

pub async fn list_patients(client: &ApiClient) -> Result<Vec<Patient>> {
    client.get("/patients").await
}

pub async fn get_patient(client: &ApiClient, id: i64) -> Result<Patient> {
    client.get(&format!("/patients/{}", id)).await
}

#[tracing::instrument(skip(client, patient), fields(last_name = %patient.last_name))]
pub async fn create_patient(client: &ApiClient, patient: &PatientCreate) -> Result<Patient> {
    let created: Patient = client.post("/patients", patient).await?;
    tracing::info!(id = created.id, "Patient created");
    Ok(created)
}

pub async fn update_patient(client: &ApiClient, id: i64, update: &PatientUpdate) -> Result<Patient> {
    client.put(&format!("/patients/{}", id), update).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_patient(client: &ApiClient, id: i64) -> Result<()> {
    client.delete(&format!("/patients/{}", id)).await?;
    tracing::info!("Patient deleted");
    Ok(())
}
