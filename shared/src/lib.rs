//! # Clinic Data Transfer Objects Library
//!
//! This library defines the contract between the clinic console and the backend REST API.
//! All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login request, token response, error payloads
//!   - **[`dto::user`]**: Staff accounts and their roles
//!   - **[`dto::patient`]**: Patient cards
//!   - **[`dto::appointment`]**: Appointments and their status vocabulary
//!   - **[`dto::medical_record`]**: Visit records
//!   - **[`dto::department`]**: Hospital departments
//!   - **[`dto::rbac`]**: Roles and permissions
//! - **[`utils`]**: Shared display helpers
//!   - **[`utils::truncate_text`]**: Shorten long free-text columns
//!   - **[`utils::or_dash`]**: Placeholder for absent optional fields
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using the default `serde` behavior:
//! - Field names use **snake_case**, matching the backend's field names
//! - Optional fields are omitted from requests when `None`
//! - Dates are ISO-8601 (`2024-01-02`), times `HH:MM:SS`, timestamps naive `YYYY-MM-DDTHH:MM:SS`
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::{LoginRequest, TokenResponse};
//!
//! let request = LoginRequest {
//!     username: "admin".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_string(&request).unwrap();
//! assert_eq!(body, r#"{"username":"admin","password":"secret"}"#);
//!
//! let response: TokenResponse =
//!     serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
//! assert_eq!(response.token(), Some("abc"));
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
