//! Small text utilities shared across layers.

/// Last `n` characters of `s`, respecting char boundaries.
///
/// Used to bound the context given to the search decision call.
pub fn tail_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// First `n` characters of `s`, respecting char boundaries.
///
/// Used to bound the transcript excerpt given to the summary call.
pub fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
