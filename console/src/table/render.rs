//! # Table Components
//!
//! Plain-text tables shared by every page. Page renderers build a [`Table`]
//! from their data; the view decides where it is printed.

use super::sort::SortState;

/// One column header. Sortable columns carry the record field they sort by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub sort_key: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub empty_message: String,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            empty_message: "No records".to_string(),
        }
    }

    pub fn column(mut self, title: impl Into<String>) -> Self {
        self.columns.push(Column {
            title: title.into(),
            sort_key: None,
        });
        self
    }

    pub fn sortable(mut self, title: impl Into<String>, key: &'static str) -> Self {
        self.columns.push(Column {
            title: title.into(),
            sort_key: Some(key),
        });
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Field keys the header lets the user sort by
    pub fn sort_keys(&self) -> Vec<&'static str> {
        self.columns.iter().filter_map(|c| c.sort_key).collect()
    }

    /// Cell text by row index and column title
    pub fn cell(&self, row: usize, title: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c.title == title)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Values of one column, top to bottom
    pub fn column_values(&self, title: &str) -> Vec<&str> {
        let Some(col) = self.columns.iter().position(|c| c.title == title) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(col).map(String::as_str))
            .collect()
    }

    fn header_text(&self, column: &Column, sort: Option<&SortState>) -> String {
        match (column.sort_key, sort) {
            (Some(key), Some(state)) if state.is_active(key) => {
                format!("{} {}", column.title, state.direction.arrow())
            }
            (Some(_), _) => format!("{} ↕", column.title),
            _ => column.title.clone(),
        }
    }

    /// Render as aligned text; sortable headers show the active direction.
    pub fn render_text(&self, sort: Option<&SortState>) -> String {
        let mut out = String::new();
        if !self.title.is_empty() {
            out.push_str(&self.title);
            out.push('\n');
        }

        if self.rows.is_empty() {
            out.push_str(&render_empty_state(&self.empty_message, None));
            return out;
        }

        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|c| self.header_text(c, sort))
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        out.push_str(&format_line(&headers, &widths));
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&format_line(&rule, &widths));
        for row in &self.rows {
            out.push_str(&format_line(row, &widths));
        }
        out
    }
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        if i + 1 < widths.len() {
            line.push_str(&" ".repeat(pad));
        }
    }
    line.push('\n');
    line
}

/// Empty state message
pub fn render_empty_state(primary_text: &str, secondary_text: Option<&str>) -> String {
    match secondary_text {
        Some(secondary) => format!("  {}\n  {}\n", primary_text, secondary),
        None => format!("  {}\n", primary_text),
    }
}

/// Stats summary, e.g. "Patients: 3  |  Users: 2"
pub fn render_stats_summary(stats: &[(&str, usize)]) -> String {
    stats
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join("  |  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new("Departments")
            .sortable("ID", "id")
            .sortable("Name", "name")
            .column("Phone");
        table.push_row(vec!["1".into(), "Кардіологія".into(), "—".into()]);
        table.push_row(vec!["12".into(), "ER".into(), "+380441234567".into()]);
        table
    }

    #[test]
    fn test_columns_align_by_char_width() {
        let text = sample().render_text(None);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Departments");
        assert!(lines[1].starts_with("ID ↕"));
        // Cyrillic cell is 11 chars; the next column starts at the same offset on every row
        let offset = |line: &str| line.chars().position(|c| c == '+' || c == '—');
        assert_eq!(offset(lines[3]), offset(lines[4]));
    }

    #[test]
    fn test_active_sort_column_is_marked() {
        let mut sort = SortState::new();
        sort.toggle("name");
        let text = sample().render_text(Some(&sort));
        assert!(text.contains("Name ▲"));
        sort.toggle("name");
        assert!(sample().render_text(Some(&sort)).contains("Name ▼"));
    }

    #[test]
    fn test_empty_table_shows_message() {
        let table = Table::new("Patients").column("ID").empty_message("No patients");
        let text = table.render_text(None);
        assert!(text.contains("No patients"));
        assert!(!text.contains("ID"));
    }

    #[test]
    fn test_cell_lookup_and_sort_keys() {
        let table = sample();
        assert_eq!(table.cell(1, "Name"), Some("ER"));
        assert_eq!(table.column_values("ID"), vec!["1", "12"]);
        assert_eq!(table.sort_keys(), vec!["id", "name"]);
        assert_eq!(table.cell(5, "Name"), None);
    }

    #[test]
    fn test_stats_summary() {
        assert_eq!(
            render_stats_summary(&[("Patients", 3), ("Users", 2)]),
            "Patients: 3  |  Users: 2"
        );
    }
}
