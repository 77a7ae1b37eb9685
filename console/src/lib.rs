//! # Clinic Console - Library Root
//!
//! Terminal admin console for the clinic-management REST backend.
//! This library crate contains every module used by the binary (`main.rs`).
//!
//! ## Features
//!
//! - **Session**: Bearer-token login, persisted across runs, torn down on any 401
//! - **Pages**: Dashboard, patients, appointments, medical records, users,
//!   departments and access control
//! - **Sort/Filter**: Client-side, null-aware column sort and live text filters
//! - **Mutations**: Create, update, delete, status and role changes, each
//!   followed by a reload of the owning page
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              clinic-console (this crate)               │
//! ├────────────────────────────────────────────────────────┤
//! │  cli       - clap grammar + rustyline shell            │
//! │  app       - navigation, pages, dataset cache, view    │
//! │  table     - sort/filter engine, text tables           │
//! │  services  - reqwest client, session, token storage    │
//! └────────────────────────────────────────────────────────┘
//!          │
//!          │ HTTP (JSON, Authorization: Bearer <token>)
//!          ▼
//! ┌─────────────────┐
//! │  Clinic backend │
//! └─────────────────┘
//! ```
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── cli (command grammar, shell loop)
//!   │   └── app (auth guard, navigation, pages)
//!   │       ├── core::ApiService ◀── services::api::ApiClient
//!   │       ├── table (sort, filter, render)
//!   │       └── view (terminal or recording)
//!   │
//!   └── debug (file logging)
//! ```
//!
//! ## Core Concepts
//!
//! ### Single-Threaded Model
//!
//! The console runs on a current-thread `tokio` runtime. Commands run one at
//! a time; the dashboard is the only place requests run concurrently
//! (`tokio::try_join!`). State lives in `Arc<RwLock<AppState>>` and locks are
//! never held across an await point.
//!
//! ### Session Expiry
//!
//! A 401 from any endpoint clears the session and its persisted token inside
//! the API client, then emits `AppEvent::SessionExpired`. The app drains the
//! event after the command and shows the login view.
//!
//! ## Usage
//!
//! ```bash
//! clinic-console --api-url http://127.0.0.1:8000/api
//! clinic-console page patients
//! ```
//!
//! ### As a Library (for testing)
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use clinic_console::app::{App, RecordingView};
//! use clinic_console::config::ConsoleConfig;
//! use clinic_console::services::{ApiClient, SessionHandle};
//!
//! # async fn demo() -> clinic_console::Result<()> {
//! let (tx, rx) = async_channel::unbounded();
//! let client = ApiClient::new(&ConsoleConfig::default(), SessionHandle::in_memory())?
//!     .with_events(tx);
//! let view = RecordingView::new();
//! let app = App::new(Arc::new(client), Box::new(view.clone()), rx);
//!
//! if app.login("admin", "admin123").await {
//!     app.navigate(clinic_console::Page::Patients).await;
//! }
//! println!("{} tables shown", view.tables().len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p clinic-console
//! ```
//!
//! Integration tests in `tests/` run the real HTTP client against an
//! in-process `axum` fake backend.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod table;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for convenience
pub use app::{App, AppEvent, AppState, Entity, Page};
pub use config::ConsoleConfig;
pub use core::{AppError, Result};
