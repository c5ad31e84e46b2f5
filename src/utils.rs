//! Small helpers shared by the store client and the binary.

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and a byte
/// count indicator appended. Cuts always land on a character boundary, so
/// Devanagari text is safe to pass.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
