//! # Page Renderers
//!
//! One module per page. Each follows the same contract:
//!
//! 1. `load_*_page` draws the skeleton, fetches the list, replaces the
//!    cache slot and renders it. A failed fetch leaves the skeleton without
//!    a table.
//! 2. `display_*` is pure: list in, [`Table`] out. The sort engine and the
//!    live filters reuse it.
//! 3. Mutations call the API and then reload the owning page. There are no
//!    optimistic updates.

pub mod appointments;
pub mod dashboard;
pub mod departments;
pub mod medical_records;
pub mod patients;
pub mod rbac;
pub mod users;

use crate::table::{FieldValue, Record, Table};

/// Field/value table for a single record. `fields` pairs a label with the
/// record column it shows.
pub fn detail_table<T: Record>(title: impl Into<String>, record: &T, fields: &[(&str, &str)]) -> Table {
    let mut table = Table::new(title).column("Field").column("Value");
    for (label, key) in fields {
        let value = match record.field(key) {
            FieldValue::Null => "—".to_string(),
            FieldValue::Bool(true) => "yes".to_string(),
            FieldValue::Bool(false) => "no".to_string(),
            FieldValue::Text(t) if t.is_empty() => "—".to_string(),
            other => other.to_string(),
        };
        table.push_row(vec![label.to_string(), value]);
    }
    table
}
