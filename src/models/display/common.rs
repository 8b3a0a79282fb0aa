//! Common display helpers

use chrono::{DateTime, Utc};

pub const EMPTY: &str = "-";

/// Truncate to `max_chars` characters with an ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `YYYY-MM-DD`, or a dash when unset
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or(EMPTY).to_string()
}

pub fn join_list(values: &[String]) -> String {
    if values.is_empty() {
        EMPTY.to_string()
    } else {
        values.join(", ")
    }
}
