//! # External Services
//!
//! - [`api`]: typed HTTP client for the clinic backend
//! - [`session`]: session store (token + current user), login/restore/logout
//! - [`storage`]: persisted token storage

pub mod api;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use session::{Session, SessionHandle};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
