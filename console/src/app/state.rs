//! # Application State Types
//!
//! Pages, entity kinds and the state shared by every page renderer.

use super::cache::DatasetCache;
use crate::table::{AppointmentFilter, SortState};
use std::fmt;
use std::str::FromStr;

/// Console pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    Patients,
    Appointments,
    MedicalRecords,
    Users,
    Departments,
    Rbac,
}

impl Page {
    /// Get all pages in menu order
    pub fn all() -> &'static [Page] {
        &[
            Page::Dashboard,
            Page::Patients,
            Page::Appointments,
            Page::MedicalRecords,
            Page::Users,
            Page::Departments,
            Page::Rbac,
        ]
    }

    /// Identifier accepted by `page <id>`
    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Patients => "patients",
            Page::Appointments => "appointments",
            Page::MedicalRecords => "medical-records",
            Page::Users => "users",
            Page::Departments => "departments",
            Page::Rbac => "rbac",
        }
    }

    /// Get page title for header display
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Patients => "Patients",
            Page::Appointments => "Appointments",
            Page::MedicalRecords => "Medical records",
            Page::Users => "System users",
            Page::Departments => "Departments",
            Page::Rbac => "Access control (RBAC)",
        }
    }

    /// Placeholder shown before the page's data arrives
    pub fn skeleton(&self) -> PageSkeleton {
        let (search, actions): (Option<&'static str>, &'static [&'static str]) = match self {
            Page::Dashboard => (None, &[]),
            Page::Patients => (Some("filter <text>  (name, phone, email)"), &["create patient key=value ..."]),
            Page::Appointments => (
                Some("filter date=YYYY-MM-DD status=<status> | filter clear"),
                &["create appointment key=value ...", "complete <id>", "cancel <id>"],
            ),
            Page::MedicalRecords => (Some("filter <text>  (diagnosis, treatment)"), &["create record key=value ..."]),
            Page::Users => (
                Some("filter <text>  (username, name, email)"),
                &["create user key=value ...", "activate <id>", "deactivate <id>"],
            ),
            Page::Departments => (None, &["create department key=value ...", "delete department <id>"]),
            Page::Rbac => (None, &["grant <role_id> <permission_id>", "revoke <role_id> <permission_id>"]),
        };
        PageSkeleton {
            page: *self,
            search_hint: search,
            actions: actions.to_vec(),
        }
    }

    /// Entity whose dataset backs this page's table
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Page::Patients => Some(Entity::Patient),
            Page::Appointments => Some(Entity::Appointment),
            Page::MedicalRecords => Some(Entity::MedicalRecord),
            Page::Users => Some(Entity::User),
            Page::Departments => Some(Entity::Department),
            Page::Dashboard | Page::Rbac => None,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Page::all()
            .iter()
            .copied()
            .find(|page| page.id() == id)
            .ok_or_else(|| format!("unknown page '{}'", s))
    }
}

/// Page header, search hint and available actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSkeleton {
    pub page: Page,
    pub search_hint: Option<&'static str>,
    pub actions: Vec<&'static str>,
}

/// Entity kinds addressed by `view`, `create`, `update` and `delete`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Patient,
    Appointment,
    MedicalRecord,
    User,
    Department,
}

impl Entity {
    /// Page that lists this entity
    pub fn page(&self) -> Page {
        match self {
            Entity::Patient => Page::Patients,
            Entity::Appointment => Page::Appointments,
            Entity::MedicalRecord => Page::MedicalRecords,
            Entity::User => Page::Users,
            Entity::Department => Page::Departments,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Entity::Patient => "patient",
            Entity::Appointment => "appointment",
            Entity::MedicalRecord => "medical record",
            Entity::User => "user",
            Entity::Department => "department",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "patient" | "patients" => Ok(Entity::Patient),
            "appointment" | "appointments" => Ok(Entity::Appointment),
            "record" | "records" | "medical-record" | "medical-records" => Ok(Entity::MedicalRecord),
            "user" | "users" => Ok(Entity::User),
            "department" | "departments" => Ok(Entity::Department),
            other => Err(format!("unknown entity '{}'", other)),
        }
    }
}

/// State shared by all page renderers
#[derive(Debug, Default)]
pub struct AppState {
    /// Page whose content currently fills the view
    pub current_page: Option<Page>,
    pub cache: DatasetCache,
    /// One sort state for every dataset; switching pages keeps it
    pub sort: SortState,
    pub appointment_filter: AppointmentFilter,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
