//! Query sanitization for the full-text and vector backends

/// Substituted for a query that sanitizes to nothing
pub const EMPTY_QUERY_PLACEHOLDER: &str = "retrievecontentemptyquery";

/// Sequences reserved by the full-text query syntax
const RESERVED: &[&str] = &[
    "+", "-", "&&", "||", "!", "(", ")", "{", "}", "[", "]", "^", "\"", "~", "*", "?", ":", "\\",
    "/",
];

/// Replace reserved full-text syntax with spaces and collapse whitespace
///
/// Never returns an empty string. Idempotent.
pub fn sanitize_query(query: &str) -> String {
    let mut sanitized = query.to_string();
    for reserved in RESERVED {
        if sanitized.contains(reserved) {
            sanitized = sanitized.replace(reserved, " ");
        }
    }

    let collapsed = collapse_whitespace(&sanitized);
    if collapsed.is_empty() {
        EMPTY_QUERY_PLACEHOLDER.to_string()
    } else {
        collapsed
    }
}

/// Aggressive form used for the single retry: alphanumerics and spaces only
///
/// Returns `None` when the result is empty or identical to `query`, in which case a
/// retry cannot find anything new.
pub fn simplify_query(query: &str) -> Option<String> {
    let kept: String = query
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    let simplified = collapse_whitespace(&kept);

    if simplified.is_empty() || simplified == query {
        None
    } else {
        Some(simplified)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_characters_become_spaces() {
        assert_eq!(sanitize_query("what is (EoE)?"), "what is EoE");
        assert_eq!(sanitize_query("a && b || c"), "a b c");
        assert_eq!(sanitize_query("IL-13/IL-4 \"signaling\""), "IL 13 IL 4 signaling");
        assert_eq!(sanitize_query("rock & roll"), "rock & roll");
    }

    #[test]
    fn test_empty_becomes_placeholder() {
        assert_eq!(sanitize_query(""), EMPTY_QUERY_PLACEHOLDER);
        assert_eq!(sanitize_query("   "), EMPTY_QUERY_PLACEHOLDER);
        assert_eq!(sanitize_query("?!*"), EMPTY_QUERY_PLACEHOLDER);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "",
            "treatment options",
            "what's the dose of (budesonide)?",
            "&&&|||",
            "x & & y",
            "tab\tseparated\nlines",
            "ünïcödé text",
        ];
        for input in inputs {
            let once = sanitize_query(input);
            assert_eq!(sanitize_query(&once), once, "input: {:?}", input);
            assert!(!once.is_empty());
        }
    }

    #[test]
    fn test_simplify_only_when_different() {
        assert_eq!(
            simplify_query("what's the dose & route"),
            Some("what s the dose route".to_string())
        );
        assert_eq!(simplify_query("already minimal"), None);
        assert_eq!(simplify_query(EMPTY_QUERY_PLACEHOLDER), None);
        assert_eq!(simplify_query("'' ''"), None);
    }
}
