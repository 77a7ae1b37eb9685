//! # Service Traits
//!
//! The seam between page renderers and the backend. Pages only see
//! [`ApiService`]; the `reqwest` implementation lives in
//! [`crate::services::api::ApiClient`].

use crate::core::error::Result;
use crate::services::session::SessionHandle;
use async_trait::async_trait;
use shared::{
    Appointment, AppointmentCreate, AppointmentUpdate, Department, DepartmentCreate,
    MedicalRecord, MedicalRecordCreate, MedicalRecordUpdate, MessageResponse, Patient,
    PatientCreate, PatientUpdate, Permission, RoleWithPermissions, TokenResponse, User,
    UserCreate, UserUpdate,
};

/// Trait for backend API operations
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Session shared with the transport (401 handling clears it)
    fn session(&self) -> &SessionHandle;

    // ----- auth -----

    /// Exchange credentials for a bearer token
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse>;

    /// Profile of the token holder
    async fn current_user(&self) -> Result<User>;

    // ----- patients -----

    async fn list_patients(&self) -> Result<Vec<Patient>>;
    async fn get_patient(&self, id: i64) -> Result<Patient>;
    async fn create_patient(&self, patient: &PatientCreate) -> Result<Patient>;
    async fn update_patient(&self, id: i64, update: &PatientUpdate) -> Result<Patient>;
    async fn delete_patient(&self, id: i64) -> Result<()>;

    // ----- appointments -----

    async fn list_appointments(&self) -> Result<Vec<Appointment>>;
    async fn get_appointment(&self, id: i64) -> Result<Appointment>;
    async fn create_appointment(&self, appointment: &AppointmentCreate) -> Result<Appointment>;
    async fn update_appointment(&self, id: i64, update: &AppointmentUpdate) -> Result<Appointment>;
    async fn delete_appointment(&self, id: i64) -> Result<MessageResponse>;

    // ----- medical records -----

    async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>>;
    async fn get_medical_record(&self, id: i64) -> Result<MedicalRecord>;
    async fn create_medical_record(&self, record: &MedicalRecordCreate) -> Result<MedicalRecord>;
    async fn update_medical_record(
        &self,
        id: i64,
        update: &MedicalRecordUpdate,
    ) -> Result<MedicalRecord>;
    async fn delete_medical_record(&self, id: i64) -> Result<MessageResponse>;

    // ----- users -----

    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: i64) -> Result<User>;
    async fn create_user(&self, user: &UserCreate) -> Result<User>;
    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User>;
    async fn delete_user(&self, id: i64) -> Result<MessageResponse>;
    async fn assign_role(&self, user_id: i64, role_id: i64) -> Result<MessageResponse>;
    async fn remove_role(&self, user_id: i64, role_id: i64) -> Result<MessageResponse>;

    // ----- departments -----

    async fn list_departments(&self) -> Result<Vec<Department>>;
    async fn get_department(&self, id: i64) -> Result<Department>;
    async fn create_department(&self, department: &DepartmentCreate) -> Result<Department>;
    async fn update_department(&self, id: i64, department: &DepartmentCreate) -> Result<Department>;
    async fn delete_department(&self, id: i64) -> Result<()>;

    // ----- rbac -----

    async fn list_roles(&self) -> Result<Vec<RoleWithPermissions>>;
    async fn list_permissions(&self) -> Result<Vec<Permission>>;
    async fn my_permissions(&self) -> Result<Vec<Permission>>;
    async fn grant_permission(&self, role_id: i64, permission_id: i64) -> Result<MessageResponse>;
    async fn revoke_permission(&self, role_id: i64, permission_id: i64) -> Result<MessageResponse>;
}
