//! # Common Error Types
//!
//! Consolidated error handling for the clinic console.
//!
//! ## Error Categories
//!
//! - **Unauthorized**: the backend answered 401; the session is already torn down
//! - **RequestFailed**: any other non-success status, message from the `detail` payload
//! - **TransportFailure**: no HTTP response reached us (connection refused, DNS, timeout)
//! - **InvalidLoginResponse**: login returned success without an access token
//! - **InvalidInput**: bad user/form input, or a non-sequence handed to the sort engine
//! - **Decode / Storage / Config / Terminal**: payload shape drift, token file I/O, configuration, line editor
//!
//! None of these are retried automatically. The console surfaces them to the user.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use clinic_console::core::error::{AppError, Result};
//!
//! fn parse_id(raw: &str) -> Result<i64> {
//!     raw.parse()
//!         .map_err(|_| AppError::InvalidInput(format!("'{}' is not a valid id", raw)))
//! }
//! ```

use thiserror::Error;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// HTTP 401. Non-retryable: the caller must log in again.
    #[error("Session expired. Please log in again.")]
    Unauthorized,

    /// Non-success status other than 401.
    ///
    /// Carries the backend's `detail` message, or `Server error: <status>`
    /// when the body had none.
    #[error("{0}")]
    RequestFailed(String),

    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    TransportFailure(String),

    /// Login succeeded at the HTTP level but carried no access token.
    #[error("Server did not return an access token. Check your credentials.")]
    InvalidLoginResponse,

    /// Invalid user input or engine input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Token storage failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Line editor failure in the interactive shell.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Errors that end the session rather than just the current action.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
