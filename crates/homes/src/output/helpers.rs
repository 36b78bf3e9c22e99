//! Common helper functions for output formatting.

use owo_colors::OwoColorize;

/// Number of ID characters shown in tables.
const ID_DISPLAY_LEN: usize = 8;

/// Truncates an ID for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(ID_DISPLAY_LEN).collect()
}

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a price with thousands separators, e.g. `$1,250,000`.
pub fn format_price(price: u64, currency: &str) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{currency}{grouped}")
}

/// Formats a bathroom count, dropping a trailing `.0`.
pub fn format_baths(bathrooms: f64) -> String {
    if bathrooms.fract() == 0.0 {
        format!("{bathrooms:.0}")
    } else {
        format!("{bathrooms}")
    }
}

/// Formats the saved marker column.
pub fn saved_marker(saved: bool, use_colors: bool) -> String {
    match (saved, use_colors) {
        (true, true) => "★".yellow().to_string(),
        (true, false) => "★".to_string(),
        (false, _) => " ".to_string(),
    }
}

/// Formats an optional bound pair for display.
pub fn format_bounds<T: std::fmt::Display>(min: Option<T>, max: Option<T>) -> Option<String> {
    match (min, max) {
        (None, None) => None,
        (Some(min), None) => Some(format!("{min}+")),
        (None, Some(max)) => Some(format!("up to {max}")),
        (Some(min), Some(max)) => Some(format!("{min} to {max}")),
    }
}

/// Styles a section label.
pub fn label(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
