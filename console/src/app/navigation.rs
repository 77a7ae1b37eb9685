//! # Navigation
//!
//! Page dispatch plus the commands that act on whatever page is current
//! (sort, filter) or on an entity kind (view, create, update, delete).

use super::forms::FormFields;
use super::pages::{appointments, dashboard, departments, medical_records, patients, rbac, users};
use super::state::{AppState, Entity, Page};
use super::view::Notice;
use super::App;
use crate::table::sort_records;
use shared::AppointmentStatus;

impl App {
    /// Dispatch a page id. Unknown ids are logged and ignored.
    pub async fn load_page(&self, id: &str) -> Option<Page> {
        match id.parse::<Page>() {
            Ok(page) => self.navigate(page).await.then_some(page),
            Err(_) => {
                tracing::warn!(page = id, "Unknown page requested");
                None
            }
        }
    }

    /// Open `page` when authenticated. Returns whether the page was loaded.
    pub async fn navigate(&self, page: Page) -> bool {
        if !self.require_auth() {
            return false;
        }
        tracing::debug!(page = %page, "Navigating");
        match page {
            Page::Dashboard => dashboard::load_dashboard(self).await,
            Page::Patients => patients::load_patients_page(self).await,
            Page::Appointments => appointments::load_appointments_page(self).await,
            Page::MedicalRecords => medical_records::load_medical_records_page(self).await,
            Page::Users => users::load_users_page(self).await,
            Page::Departments => departments::load_departments_page(self).await,
            Page::Rbac => rbac::load_rbac_page(self).await,
        }
        true
    }

    /// Reload the current page, or the dashboard when none is open
    pub async fn reload(&self) -> bool {
        let page = self.current_page().unwrap_or(Page::Dashboard);
        self.navigate(page).await
    }

    /// Columns the current page can be sorted by
    pub fn sortable_columns(&self) -> Vec<&'static str> {
        let table = match self.current_page().and_then(|p| p.entity()) {
            Some(Entity::Patient) => patients::display_patients(&[]),
            Some(Entity::Appointment) => appointments::display_appointments(&[]),
            Some(Entity::MedicalRecord) => medical_records::display_medical_records(&[]),
            Some(Entity::User) => users::display_users(&[]),
            Some(Entity::Department) => departments::display_departments(&[]),
            None => return Vec::new(),
        };
        table.sort_keys()
    }

    /// Sort the current page's cached dataset by `column`.
    ///
    /// Same column again flips the direction. The cache keeps its fetch
    /// order; only the rendered copy is sorted.
    pub fn sort(&self, column: &str) {
        if !self.require_auth() {
            return;
        }
        let Some(page) = self.current_page() else {
            self.view().notify(Notice::Error("Open a page first".to_string()));
            return;
        };
        let Some(entity) = page.entity() else {
            self.view().notify(Notice::Error(format!(
                "The {} page has no sortable columns",
                page.title()
            )));
            return;
        };
        let columns = self.sortable_columns();
        if !columns.contains(&column) {
            self.view().notify(Notice::Error(format!(
                "Cannot sort {} by '{}'. Sortable columns: {}",
                page.id(),
                column,
                columns.join(", ")
            )));
            return;
        }

        let (table, sort) = {
            let mut state = self.state.write();
            let AppState { cache, sort, .. } = &mut *state;
            let table = match entity {
                Entity::Patient => sort_records(sort, &cache.patients, column, |rows| {
                    patients::display_patients(&rows)
                }),
                Entity::Appointment => sort_records(sort, &cache.appointments, column, |rows| {
                    appointments::display_appointments(&rows)
                }),
                Entity::MedicalRecord => sort_records(sort, &cache.medical_records, column, |rows| {
                    medical_records::display_medical_records(&rows)
                }),
                Entity::User => sort_records(sort, &cache.users, column, |rows| users::display_users(&rows)),
                Entity::Department => sort_records(sort, &cache.departments, column, |rows| {
                    departments::display_departments(&rows)
                }),
            };
            (table, sort.clone())
        };
        self.view().show_table(&table, &sort);
    }

    /// Live filter of the current page
    pub fn filter(&self, terms: &[String]) {
        if !self.require_auth() {
            return;
        }
        let query = terms.join(" ");
        match self.current_page() {
            Some(Page::Patients) => patients::filter_patients(self, &query),
            Some(Page::MedicalRecords) => medical_records::filter_medical_records(self, &query),
            Some(Page::Users) => users::filter_users(self, &query),
            Some(Page::Appointments) => appointments::apply_appointment_filters(self, terms),
            Some(page) => self.view().notify(Notice::Error(format!(
                "The {} page has no filter",
                page.title()
            ))),
            None => self
                .view()
                .notify(Notice::Error("Open a page first".to_string())),
        }
    }

    /// Detail view of one record
    pub async fn view_entity(&self, entity: Entity, id: i64) {
        if !self.require_auth() {
            return;
        }
        match entity {
            Entity::Patient => patients::view_patient(self, id).await,
            Entity::Appointment => appointments::view_appointment(self, id).await,
            Entity::MedicalRecord => medical_records::view_medical_record(self, id).await,
            Entity::User => users::view_user(self, id).await,
            Entity::Department => departments::view_department(self, id).await,
        }
    }

    pub async fn create(&self, entity: Entity, pairs: &[String]) {
        if !self.require_auth() {
            return;
        }
        let fields = match FormFields::parse(pairs) {
            Ok(fields) => fields,
            Err(e) => return self.report(&format!("Cannot create {}", entity), &e),
        };
        match entity {
            Entity::Patient => patients::create_patient(self, fields).await,
            Entity::Appointment => appointments::create_appointment(self, fields).await,
            Entity::MedicalRecord => medical_records::create_medical_record(self, fields).await,
            Entity::User => users::create_user(self, fields).await,
            Entity::Department => departments::create_department(self, fields).await,
        }
    }

    pub async fn update(&self, entity: Entity, id: i64, pairs: &[String]) {
        if !self.require_auth() {
            return;
        }
        let fields = match FormFields::parse(pairs) {
            Ok(fields) => fields,
            Err(e) => return self.report(&format!("Cannot update {}", entity), &e),
        };
        match entity {
            Entity::Patient => patients::update_patient(self, id, fields).await,
            Entity::Appointment => appointments::update_appointment(self, id, fields).await,
            Entity::MedicalRecord => medical_records::update_medical_record(self, id, fields).await,
            Entity::User => users::update_user(self, id, fields).await,
            Entity::Department => departments::update_department(self, id, fields).await,
        }
    }

    pub async fn delete(&self, entity: Entity, id: i64) {
        if !self.require_auth() {
            return;
        }
        match entity {
            Entity::Patient => patients::delete_patient(self, id).await,
            Entity::Appointment => appointments::delete_appointment(self, id).await,
            Entity::MedicalRecord => medical_records::delete_medical_record(self, id).await,
            Entity::User => users::delete_user(self, id).await,
            Entity::Department => departments::delete_department(self, id).await,
        }
    }
}

/// Entity-specific actions
impl App {
    pub async fn set_appointment_status(&self, id: i64, status: AppointmentStatus) {
        appointments::set_appointment_status(self, id, status).await;
    }

    pub async fn complete_appointment(&self, id: i64) {
        appointments::complete_appointment(self, id).await;
    }

    /// Asks for confirmation first
    pub async fn cancel_appointment(&self, id: i64) {
        appointments::cancel_appointment(self, id).await;
    }

    pub async fn set_user_active(&self, id: i64, active: bool) {
        if self.require_auth() {
            users::set_user_active(self, id, active).await;
        }
    }

    pub async fn assign_role(&self, user_id: i64, role_id: i64) {
        if self.require_auth() {
            users::assign_role(self, user_id, role_id).await;
        }
    }

    pub async fn remove_role(&self, user_id: i64, role_id: i64) {
        if self.require_auth() {
            users::remove_role(self, user_id, role_id).await;
        }
    }

    pub async fn grant_permission(&self, role_id: i64, permission_id: i64) {
        if self.require_auth() {
            rbac::grant_permission(self, role_id, permission_id).await;
        }
    }

    pub async fn revoke_permission(&self, role_id: i64, permission_id: i64) {
        if self.require_auth() {
            rbac::revoke_permission(self, role_id, permission_id).await;
        }
    }

    /// Users holding the configured doctor role
    pub async fn list_doctors(&self) {
        if self.require_auth() {
            users::list_doctors(self).await;
        }
    }
}
