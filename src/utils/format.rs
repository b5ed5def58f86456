//! Formatting utilities for file sizes and dates.

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count in binary units (e.g., "1.5 KB", "0 B").
///
/// Two decimals at most, trailing zeros trimmed.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exp = exp.min(SIZE_UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, SIZE_UNITS[exp])
}

/// Date part (YYYY-MM-DD) of an RFC 3339 timestamp.
pub fn format_date(timestamp: &str) -> String {
    match timestamp.get(..10) {
        Some(date) if timestamp.as_bytes().get(4) == Some(&b'-') => date.to_string(),
        _ => timestamp.to_string(),
    }
}

/// Storage meter caption: "1.5 GB of 15 GB used".
pub fn format_usage(used: u64, limit: u64) -> String {
    format!("{} of {} used", format_size(used), format_size(limit))
}
