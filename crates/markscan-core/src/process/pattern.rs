//! Pattern matching utilities for memory searching.
//!
//! Plain byte-literal search over buffers. Positions are byte offsets into
//! the searched buffer.

/// Find all non-overlapping occurrences of a pattern in a buffer.
///
/// After a match the search resumes right after the matched bytes.
///
/// # Example
///
/// ```
/// use markscan_core::process::pattern::find_pattern;
///
/// let buffer = [1, 2, 3, 1, 2, 3, 4];
/// let matches = find_pattern(&buffer, &[1, 2, 3]);
/// assert_eq!(matches, vec![0, 3]);
/// ```
pub fn find_pattern(buffer: &[u8], pattern: &[u8]) -> Vec<usize> {
    let mut results = Vec::new();
    let mut from = 0;
    while let Some(pos) = find_pattern_from(buffer, pattern, from) {
        results.push(pos);
        from = pos + pattern.len();
    }
    results
}

/// Find the first occurrence of a pattern in a buffer.
///
/// Returns the byte offset where the pattern starts, or None if not found.
pub fn find_first_pattern(buffer: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() || pattern.len() > buffer.len() {
        return None;
    }

    buffer
        .windows(pattern.len())
        .position(|window| window == pattern)
}

/// Find the first occurrence of a pattern at or after `from`.
pub fn find_pattern_from(buffer: &[u8], pattern: &[u8], from: usize) -> Option<usize> {
    let rest = buffer.get(from..)?;
    find_first_pattern(rest, pattern).map(|pos| pos + from)
}
