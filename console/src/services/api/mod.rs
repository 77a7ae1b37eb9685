//! # Backend API Client Module
//!
//! HTTP client for the clinic backend. One file per endpoint family, all
//! routed through [`ApiClient::request`].
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs              - ApiService implementation for ApiClient
//! ├── client.rs           - ApiClient, RequestOptions, response normalization
//! ├── auth.rs             - /auth/login, /auth/me
//! ├── patients.rs         - /patients
//! ├── appointments.rs     - /appointments
//! ├── medical_records.rs  - /medical-records
//! ├── users.rs            - /users (+ role links)
//! ├── departments.rs      - /departments
//! └── rbac.rs             - /rbac roles and permissions
//! ```

pub mod appointments;
pub mod auth;
pub mod client;
pub mod departments;
pub mod medical_records;
pub mod patients;
pub mod rbac;
pub mod users;

pub use client::{expect_payload, ApiClient, RequestOptions};

use crate::core::error::Result;
use crate::core::service::ApiService;
use crate::services::session::SessionHandle;
use shared::{
    Appointment, AppointmentCreate, AppointmentUpdate, Department, DepartmentCreate,
    MedicalRecord, MedicalRecordCreate, MedicalRecordUpdate, MessageResponse, Patient,
    PatientCreate, PatientUpdate, Permission, RoleWithPermissions, TokenResponse, User,
    UserCreate, UserUpdate,
};

#[async_trait::async_trait]
impl ApiService for ApiClient {
    fn session(&self) -> &SessionHandle {
        self.session_handle()
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse> {
        auth::login(self, username, password).await
    }

    async fn current_user(&self) -> Result<User> {
        auth::current_user(self).await
    }

    async fn list_patients(&self) -> Result<Vec<Patient>> {
        patients::list_patients(self).await
    }

    async fn get_patient(&self, id: i64) -> Result<Patient> {
        patients::get_patient(self, id).await
    }

    async fn create_patient(&self, patient: &PatientCreate) -> Result<Patient> {
        patients::create_patient(self, patient).await
    }

    async fn update_patient(&self, id: i64, update: &PatientUpdate) -> Result<Patient> {
        patients::update_patient(self, id, update).await
    }

    async fn delete_patient(&self, id: i64) -> Result<()> {
        patients::delete_patient(self, id).await
    }

    async fn list_appointments(&self) -> Result<Vec<Appointment>> {
        appointments::list_appointments(self).await
    }

    async fn get_appointment(&self, id: i64) -> Result<Appointment> {
        appointments::get_appointment(self, id).await
    }

    async fn create_appointment(&self, appointment: &AppointmentCreate) -> Result<Appointment> {
        appointments::create_appointment(self, appointment).await
    }

    async fn update_appointment(&self, id: i64, update: &AppointmentUpdate) -> Result<Appointment> {
        appointments::update_appointment(self, id, update).await
    }

    async fn delete_appointment(&self, id: i64) -> Result<MessageResponse> {
        appointments::delete_appointment(self, id).await
    }

    async fn list_medical_records(&self) -> Result<Vec<MedicalRecord>> {
        medical_records::list_medical_records(self).await
    }

    async fn get_medical_record(&self, id: i64) -> Result<MedicalRecord> {
        medical_records::get_medical_record(self, id).await
    }

    async fn create_medical_record(&self, record: &MedicalRecordCreate) -> Result<MedicalRecord> {
        medical_records::create_medical_record(self, record).await
    }

    async fn update_medical_record(
        &self,
        id: i64,
        update: &MedicalRecordUpdate,
    ) -> Result<MedicalRecord> {
        medical_records::update_medical_record(self, id, update).await
    }

    async fn delete_medical_record(&self, id: i64) -> Result<MessageResponse> {
        medical_records::delete_medical_record(self, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        users::list_users(self).await
    }

    async fn get_user(&self, id: i64) -> Result<User> {
        users::get_user(self, id).await
    }

    async fn create_user(&self, user: &UserCreate) -> Result<User> {
        users::create_user(self, user).await
    }

    async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        users::update_user(self, id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<MessageResponse> {
        users::delete_user(self, id).await
    }

    async fn assign_role(&self, user_id: i64, role_id: i64) -> Result<MessageResponse> {
        users::assign_role(self, user_id, role_id).await
    }

    async fn remove_role(&self, user_id: i64, role_id: i64) -> Result<MessageResponse> {
        users::remove_role(self, user_id, role_id).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        departments::list_departments(self).await
    }

    async fn get_department(&self, id: i64) -> Result<Department> {
        departments::get_department(self, id).await
    }

    async fn create_department(&self, department: &DepartmentCreate) -> Result<Department> {
        departments::create_department(self, department).await
    }

    async fn update_department(&self, id: i64, department: &DepartmentCreate) -> Result<Department> {
        departments::update_department(self, id, department).await
    }

    async fn delete_department(&self, id: i64) -> Result<()> {
        departments::delete_department(self, id).await
    }

    async fn list_roles(&self) -> Result<Vec<RoleWithPermissions>> {
        rbac::list_roles(self).await
    }

    async fn list_permissions(&self) -> Result<Vec<Permission>> {
        rbac::list_permissions(self).await
    }

    async fn my_permissions(&self) -> Result<Vec<Permission>> {
        rbac::my_permissions(self).await
    }

    async fn grant_permission(&self, role_id: i64, permission_id: i64) -> Result<MessageResponse> {
        rbac::grant_permission(self, role_id, permission_id).await
    }

    async fn revoke_permission(&self, role_id: i64, permission_id: i64) -> Result<MessageResponse> {
        rbac::revoke_permission(self, role_id, permission_id).await
    }
}
