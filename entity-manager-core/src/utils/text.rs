//! String helpers shared by search and rename.

/// Replace the first occurrence of `find` with `replace`.
///
/// Returns `None` when `find` is empty or does not occur in `value`.
/// Matching is case-sensitive and literal.
pub fn replace_first(value: &str, find: &str, replace: &str) -> Option<String> {
    if find.is_empty() || !value.contains(find) {
        return None;
    }
    Some(value.replacen(find, replace, 1))
}

/// Case-insensitive substring test; `needle` must already be lowercased.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
