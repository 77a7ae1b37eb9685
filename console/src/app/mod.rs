//! # Application Orchestrator
//!
//! The [`App`] ties the API service, the shared [`AppState`] and a [`View`]
//! together. Commands from the shell land on `App` methods; page renderers
//! live in [`pages`] as free functions taking `&App`.
//!
//! ```text
//! command ──▶ App (auth guard, navigation)
//!               │
//!               ▼
//!          pages::*::load_*_page ──▶ ApiService ──▶ DatasetCache
//!               │                                      │
//!               ▼                                      ▼
//!          View::show_page / show_table ◀── display_* (pure)
//! ```
//!
//! Runs on a single-threaded runtime. Locks on [`AppState`] are taken
//! between await points only, never across them.
//!
//! 401 responses arrive as [`AppEvent::SessionExpired`] on the event channel
//! and are drained by [`App::process_events`] after every command.

pub mod cache;
pub mod events;
pub mod forms;
pub mod navigation;
pub mod pages;
pub mod state;
pub mod view;

pub use cache::DatasetCache;
pub use events::AppEvent;
pub use state::{AppState, Entity, Page, PageSkeleton};
pub use view::{Notice, RecordingView, TerminalView, View, ViewOutput};

use crate::config::DEFAULT_DOCTOR_ROLE;
use crate::core::error::AppError;
use crate::core::service::ApiService;
use crate::services::session::{self, SessionHandle};
use crate::table::{SortState, Table};
use async_channel::Receiver;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct App {
    /// Page, dataset cache and sort state shared by all renderers
    pub state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    view: Box<dyn View>,
    event_rx: Receiver<AppEvent>,
    doctor_role: String,
}

impl App {
    pub fn new(api: Arc<dyn ApiService>, view: Box<dyn View>, event_rx: Receiver<AppEvent>) -> Self {
        Self {
            state: Arc::new(RwLock::new(AppState::new())),
            api,
            view,
            event_rx,
            doctor_role: DEFAULT_DOCTOR_ROLE.to_string(),
        }
    }

    /// Role name that marks a user as a doctor
    pub fn with_doctor_role(mut self, role: impl Into<String>) -> Self {
        self.doctor_role = role.into();
        self
    }

    pub fn api(&self) -> &dyn ApiService {
        self.api.as_ref()
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn session(&self) -> &SessionHandle {
        self.api.session()
    }

    pub fn doctor_role(&self) -> &str {
        &self.doctor_role
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn current_page(&self) -> Option<Page> {
        self.state.read().current_page
    }

    /// Drain service events. Returns true when the session expired.
    pub fn process_events(&self) -> bool {
        let mut expired = false;
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                AppEvent::SessionExpired => expired = true,
            }
        }
        if expired {
            tracing::info!("Session expired, showing login");
            self.reset_state();
            self.view
                .show_login(Some(&AppError::Unauthorized.to_string()));
        }
        expired
    }

    fn reset_state(&self) {
        let mut state = self.state.write();
        state.current_page = None;
        state.cache.clear();
        state.appointment_filter.clear();
    }

    /// Show the login view instead of running a protected action
    pub(crate) fn require_auth(&self) -> bool {
        if self.is_authenticated() {
            return true;
        }
        tracing::info!("Access denied: not authenticated");
        self.view.show_login(None);
        false
    }

    /// Log and surface a failed action
    pub(crate) fn report(&self, context: &str, error: &AppError) {
        tracing::error!(error = %error, "{}", context);
        self.view
            .notify(Notice::Error(format!("{}: {}", context, error)));
        if error.is_unauthorized() {
            self.process_events();
        }
    }

    pub(crate) fn success(&self, message: impl Into<String>) {
        self.view.notify(Notice::Success(message.into()));
    }

    /// Render a table with the current sort markers
    pub(crate) fn show_table(&self, table: &Table) {
        let sort: SortState = self.state.read().sort.clone();
        self.view.show_table(table, &sort);
    }

    /// Make `page` the exclusive content and draw its skeleton
    pub(crate) fn begin_page(&self, page: Page) {
        self.state.write().current_page = Some(page);
        self.view.show_page(&page.skeleton());
    }

    /// Log in, then open the dashboard. Returns whether a session exists.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        match session::login(self.api(), username, password).await {
            Ok(user) => {
                let name = user
                    .map(|u| u.full_name)
                    .unwrap_or_else(|| username.to_string());
                self.success(format!("Logged in as {}", name));
                self.navigate(Page::Dashboard).await;
                true
            }
            Err(e) => {
                self.report("Login failed", &e);
                false
            }
        }
    }

    /// Restore the persisted session at start-up.
    pub async fn restore_session(&self) -> bool {
        match session::restore(self.api()).await {
            Ok(true) => {
                if let Some(user) = self.session().user() {
                    self.view
                        .notify(Notice::Info(format!("Welcome back, {}", user.full_name)));
                }
                true
            }
            Ok(false) => {
                self.view.show_login(None);
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session restore failed");
                self.reset_state();
                self.view
                    .show_login(Some(&format!("Could not restore session: {}", e)));
                false
            }
        }
    }

    pub fn logout(&self) {
        session::logout(self.session());
        self.reset_state();
        self.view.show_login(None);
    }

    pub fn whoami(&self) {
        let snapshot = self.session().snapshot();
        match (snapshot.token.is_some(), snapshot.user) {
            (false, _) => self.view.show_login(None),
            (true, Some(user)) => {
                let roles = user.role_names().join(", ");
                self.view.show_text(&format!(
                    "{} ({}) roles: {}",
                    user.full_name,
                    user.username,
                    if roles.is_empty() { "—" } else { roles.as_str() }
                ));
            }
            (true, None) => self
                .view
                .show_text("Logged in (profile not loaded)"),
        }
    }
}
