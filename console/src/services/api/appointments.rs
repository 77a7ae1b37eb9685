//! # Appointment Endpoints
//!
//! Status transitions (complete, cancel) are plain `PUT`s carrying only `status`.

use super::client::ApiClient;
use crate::core::error::Result;
use shared::{Appointment, AppointmentCreate, AppointmentUpdate, MessageResponse};

pub async fn list_appointments(client: &ApiClient) -> Result<Vec<Appointment>> {
    client.get("/appointments").await
}

pub async fn get_appointment(client: &ApiClient, id: i64) -> Result<Appointment> {
    client.get(&format!("/appointments/{}", id)).await
}

#[tracing::instrument(skip(client, appointment), fields(patient_id = appointment.patient_id, doctor_id = appointment.doctor_id))]
pub async fn create_appointment(
    client: &ApiClient,
    appointment: &AppointmentCreate,
) -> Result<Appointment> {
    let created: Appointment = client.post("/appointments", appointment).await?;
    tracing::info!(id = created.id, "Appointment created");
    Ok(created)
}

#[tracing::instrument(skip(client, update), fields(status = ?update.status))]
pub async fn update_appointment(
    client: &ApiClient,
    id: i64,
    update: &AppointmentUpdate,
) -> Result<Appointment> {
    client.put(&format!("/appointments/{}", id), update).await
}

/// The backend keeps the row and marks it cancelled
pub async fn delete_appointment(client: &ApiClient, id: i64) -> Result<MessageResponse> {
    let response: MessageResponse = client.delete_with(&format!("/appointments/{}", id)).await?;
    tracing::info!(id, "Appointment deleted");
    Ok(response)
}
