//! Glob matching for cache keys.
//!
//! Only `*` is special: it matches any run of characters, including none.

/// Checks if a cache key matches a glob pattern.
///
/// # Examples
///
/// ```
/// use arena_core::cache::pattern_matches;
///
/// assert!(pattern_matches("game:all", "game:all"));
/// assert!(pattern_matches("game:*", "game:id:42"));
/// assert!(pattern_matches("*:id:*", "tournament:id:7"));
/// assert!(!pattern_matches("game:*", "tournament:all"));
/// ```
pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    let mut segments = pattern.split('*');

    // The text before the first `*` is anchored at the start of the key.
    let first = segments.next().unwrap_or_default();
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }

    // The text after the last `*` is anchored at the end.
    rest.ends_with(last)
}
