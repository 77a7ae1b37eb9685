//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the console and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, token and error payloads
//! - [`user`] - Staff accounts
//! - [`patient`] - Patient cards
//! - [`appointment`] - Appointments
//! - [`medical_record`] - Medical records
//! - [`department`] - Departments
//! - [`rbac`] - Roles and permissions
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Optional fields**: Omitted when `None` using `#[serde(skip_serializing_if = "Option::is_none")]`
//! - **Enums**: Serialize to snake_case strings
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "username": "admin", "password": "admin123" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! { "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "token_type": "bearer" }
//! ```

pub mod appointment;
pub mod auth;
pub mod department;
pub mod medical_record;
pub mod patient;
pub mod rbac;
pub mod user;

pub use appointment::*;
pub use auth::*;
pub use department::*;
pub use medical_record::*;
pub use patient::*;
pub use rbac::*;
pub use user::*;
