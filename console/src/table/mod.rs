//! # Sort/Filter Engine
//!
//! Entity-agnostic table logic:
//! - [`value`]: `FieldValue` and the `Record` column accessor
//! - [`sort`]: toggling, null-aware column sort
//! - [`filter`]: live text filters and the appointment date/status filter
//! - [`render`]: plain-text tables

pub mod filter;
pub mod render;
pub mod sort;
pub mod value;

pub use filter::{filter_text, AppointmentFilter, Searchable};
pub use render::{render_empty_state, render_stats_summary, Column, Table};
pub use sort::{compare_fields, sort_json, sort_records, sorted_by, SortDirection, SortState};
pub use value::{FieldValue, Record};
