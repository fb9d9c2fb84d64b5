//! Snippet extraction for source passages

/// Longest snippet attached to a source
pub const MAX_SNIPPET_CHARS: usize = 500;

/// Leading passage of `text`, at most `max_chars` characters
///
/// A truncated passage is cut back to its last sentence terminator when that keeps
/// more than half of the limit.
pub fn extract_snippet(text: &str, max_chars: usize) -> String {
    let cleaned = text.trim();
    let end = match cleaned.char_indices().nth(max_chars) {
        Some((idx, _)) => idx,
        None => return cleaned.to_string(),
    };

    let truncated = &cleaned[..end];
    if let Some(boundary) = truncated.rfind(['.', '!', '?']) {
        if truncated[..boundary].chars().count() > max_chars / 2 {
            return truncated[..=boundary].to_string();
        }
    }
    truncated.to_string()
}
