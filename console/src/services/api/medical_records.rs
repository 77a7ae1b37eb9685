//! # Medical Record Endpoints

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{MedicalRecord, MedicalRecordCreate, MedicalRecordUpdate, MessageResponse};

pub async fn list_medical_records(client: &ApiClient) -> Result<Vec<MedicalRecord>> {
    client.get("/medical-records").await
}

pub async fn get_medical_record(client: &ApiClient, id: i64) -> Result<MedicalRecord> {
    client.get(&format!("/medical-records/{}", id)).await
}

pub async fn create_medical_record(
    client: &ApiClient,
    record: &MedicalRecordCreate,
) -> Result<MedicalRecord> {
    let created: MedicalRecord = client.post("/medical-records", record).await?;
    tracing::info!(id = created.id, patient_id = created.patient_id, "Medical record created");
    Ok(created)
}

pub async fn update_medical_record(
    client: &ApiClient,
    id: i64,
    update: &MedicalRecordUpdate,
) -> Result<MedicalRecord> {
    client.put(&format!("/medical-records/{}", id), update).await
}

pub async fn delete_medical_record(client: &ApiClient, id: i64) -> Result<MessageResponse> {
    let response: MessageResponse = client
        .delete_with(&format!("/medical-records/{}", id))
        .await?;
    tracing::info!(id, "Medical record deleted");
    Ok(response)
}
