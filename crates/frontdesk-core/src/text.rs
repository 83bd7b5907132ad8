//! Text helpers shared by the matcher and the context builder.

/// Normalize inbound text for matching: trim and lowercase.
///
/// All matcher comparisons (keywords, intent patterns, the free-chat exit
/// token) run over this form so matching is case-insensitive end to end.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// `&str[..n]` panics when `n` falls inside a multi-byte character, and
/// inbound chat text is routinely non-ASCII. Returns the longest prefix
/// whose byte length is ≤ `max_bytes` without splitting a character.
#[inline]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    // Walk backward to find a char boundary.
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate `s` and append `suffix` if the original exceeds `max_bytes`.
///
/// The result is at most `max_bytes` bytes including the suffix. A string
/// that fits is returned as-is.
pub fn truncate_with_suffix(s: &str, max_bytes: usize, suffix: &str) -> String {
    if s.len() <= max_bytes {
        return s.to_owned();
    }
    let body_budget = max_bytes.saturating_sub(suffix.len());
    format!("{}{suffix}", truncate_str(s, body_budget))
}
