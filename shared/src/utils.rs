//! # Shared Utility Functions
//!
//! Display helpers used when turning DTOs into table cells.
//!
//! - [`truncate_text`] - Shorten free text to a character budget with an ellipsis
//! - [`or_dash`] - Render an absent optional field as a dash
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{or_dash, truncate_text};
//!
//! assert_eq!(truncate_text("Headache and fever", 8), "Headache...");
//! assert_eq!(or_dash(None), "—");
//! ```

/// Default column budget for long free-text cells (reason, treatment).
pub const TEXT_PREVIEW_CHARS: usize = 50;

/// Keep the first `max_chars` characters of `text`, appending `...` when
/// anything was cut.
///
/// Counts Unicode scalar values, not bytes, so Cyrillic text is never split
/// inside a code point.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_text;
///
/// assert_eq!(truncate_text("short", 50), "short");
/// assert_eq!(truncate_text("Біль у грудях", 4), "Біль...");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// Render an optional, possibly empty field for display.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "—".to_string(),
    }
}
