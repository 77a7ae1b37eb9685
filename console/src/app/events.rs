//! # Application Events
//!
//! Notifications sent from the service layer back to the app loop.

/// Events drained by [`crate::app::App`] after every action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A request came back 401; the session is already cleared
    SessionExpired,
}
