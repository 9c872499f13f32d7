/// Returns "$123.45", or "-$12.34" for credits.
pub fn format_usd(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Joins a group-key tuple for display: ["2025-12", "aws"] -> "2025-12 / aws".
pub fn format_group_key(key: &[String]) -> String {
    key.join(" / ")
}

/// Returns "40%" style share of a total. Zero totals render as "-".
pub fn format_share(part: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{}%", (part as f64 / total as f64 * 100.0).round() as u64)
}
