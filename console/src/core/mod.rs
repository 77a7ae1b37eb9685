//! # Core Abstractions
//!
//! Core traits and error types shared by every layer of the console.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Backend service trait (`ApiService`)
//!
//! ## Dependency Injection
//!
//! Page renderers take `&dyn ApiService`, never the concrete client:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clinic_console::config::ConsoleConfig;
//! use clinic_console::core::ApiService;
//! use clinic_console::services::api::ApiClient;
//! use clinic_console::services::session::SessionHandle;
//!
//! let client = ApiClient::new(&ConsoleConfig::default(), SessionHandle::in_memory()).unwrap();
//! let api: Arc<dyn ApiService> = Arc::new(client);
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::ApiService;
