//! Common display utilities and helpers

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Indent a label by two spaces per level of depth
pub fn indent(depth: usize, label: &str) -> String {
    format!("{}{}", "  ".repeat(depth), label)
}

/// Render an optional value, using `-` when absent
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
