//! # Column Sorting
//!
//! One sort routine shared by every page. Each invocation toggles the
//! process-wide [`SortState`], orders a copy of the dataset by the chosen
//! column and hands the copy to the caller's render function. The input
//! slice is never reordered.
//!
//! Ordering rules:
//! - two null values are equal
//! - a null value comes first ascending and last descending
//! - text compares case-insensitively, other values natively
//!
//! Ties keep their input order (`sort_by` is stable).

use super::value::{FieldValue, Record};
use crate::core::error::{AppError, Result};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header marker
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("ascending"),
            SortDirection::Descending => f.write_str("descending"),
        }
    }
}

/// Active column and direction, shared across all datasets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub active_column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same column flips the direction; a new column starts ascending.
    pub fn toggle(&mut self, column: &str) -> SortDirection {
        if self.active_column.as_deref() == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.active_column = Some(column.to_string());
            self.direction = SortDirection::Ascending;
        }
        self.direction
    }

    pub fn is_active(&self, column: &str) -> bool {
        self.active_column.as_deref() == Some(column)
    }
}

/// Null-aware comparison of two column values in `direction`.
pub fn compare_fields(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => match direction {
            SortDirection::Ascending => Ordering::Less,
            SortDirection::Descending => Ordering::Greater,
        },
        (false, true) => match direction {
            SortDirection::Ascending => Ordering::Greater,
            SortDirection::Descending => Ordering::Less,
        },
        (false, false) => {
            let ord = a.compare_present(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Ordered copy of `data` by `column`, without touching any sort state.
pub fn sorted_by<T>(data: &[T], column: &str, direction: SortDirection) -> Vec<T>
where
    T: Record + Clone,
{
    let mut keyed: Vec<(FieldValue, T)> = data
        .iter()
        .map(|item| (item.field(column), item.clone()))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| compare_fields(a, b, direction));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Toggle `state` for `column`, then render a sorted copy of `data`.
pub fn sort_records<T, R, F>(state: &mut SortState, data: &[T], column: &str, render: F) -> R
where
    T: Record + Clone,
    F: FnOnce(Vec<T>) -> R,
{
    let direction = state.toggle(column);
    tracing::debug!(column, %direction, rows = data.len(), "Sorting dataset");
    render(sorted_by(data, column, direction))
}

/// Sort an untyped JSON dataset.
///
/// The state toggles before the shape check, so a rejected call still
/// counts as a click on `column`. Anything but an array is
/// [`AppError::InvalidInput`] and `render` is not called.
pub fn sort_json<R, F>(state: &mut SortState, data: &Value, column: &str, render: F) -> Result<R>
where
    F: FnOnce(Vec<Value>) -> R,
{
    let direction = state.toggle(column);
    let Some(rows) = data.as_array() else {
        tracing::warn!(column, "Refusing to sort a non-array dataset");
        return Err(AppError::InvalidInput(format!(
            "cannot sort by '{}': dataset is not a list",
            column
        )));
    };
    Ok(render(sorted_by(rows, column, direction)))
}
