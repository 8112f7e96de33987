//! Text helpers shared by the pipeline stages. All truncation is by
//! character count, never bytes — fragments are CJK-heavy and a byte
//! slice could split a code point.

/// Truncate to at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Collapse embedded newlines to spaces.
pub fn collapse_newlines(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
