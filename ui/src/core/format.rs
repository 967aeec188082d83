//! Formatting helpers for presenting metrics.

/// Rendered in place of a value that could not be parsed.
pub const PLACEHOLDER: &str = "—";

/// Seconds with two decimals, as the duration chart tooltips show them.
pub fn format_seconds(value: Option<f64>) -> String {
    match value {
        Some(ms) if ms.is_finite() => format!("{:.2}s", ms / 1000.0),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) if pct.is_finite() => format!("{pct:.0}%"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Integer with thousands separators (`13500` → `13,500`).
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
