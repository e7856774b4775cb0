//! Text normalization shared by both ingestion paths

/// Collapse every run of whitespace into a single ASCII space and trim the ends.
///
/// Newlines, tabs and other Unicode whitespace all count as whitespace.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text for log output without splitting a character
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
