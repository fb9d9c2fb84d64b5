//! Named extraction rules for retrieval payloads
//!
//! Payloads are rendered by the knowledge backend and their exact shape depends on
//! how records are printed (JSON, Python-style reprs, `<Record ...>` wrappers).
//! Each field has an ordered list of rules; the first rule that captures wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Keys a vector payload may use for its source path, in priority order
pub const VECTOR_SOURCE_KEYS: &[&str] = &["source2", "source_path", "source"];

/// Key a vector payload uses for its chunk text
pub const VECTOR_TEXT_KEY: &str = "text";

/// A regex with a single capture group, identified by name in logs
#[derive(Debug)]
pub struct ExtractionRule {
    name: &'static str,
    pattern: Regex,
}

impl ExtractionRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid extraction rule"),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First capture of this rule in `text`
    pub fn capture<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// First rule of `rules` that captures in `text`, with the rule's name
pub fn first_capture<'a>(
    rules: &[ExtractionRule],
    text: &'a str,
) -> Option<(&'static str, &'a str)> {
    rules
        .iter()
        .find_map(|rule| rule.capture(text).map(|c| (rule.name(), c)))
}

/// Source path of a vector payload that did not parse as a map
pub static VECTOR_SOURCE_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    vec![
        ExtractionRule::new(
            "source_single_quoted",
            r#"\b(?:source2|source_path|source)['"]?\s*[:=]\s*'([^']*)'"#,
        ),
        ExtractionRule::new(
            "source_double_quoted",
            r#"\b(?:source2|source_path|source)['"]?\s*[:=]\s*"([^"]*)""#,
        ),
        ExtractionRule::new(
            "source_bare_token",
            r#"\b(?:source2|source_path)['":=\s]+([^'",\s}>]+)"#,
        ),
    ]
});

/// Chunk text of a vector payload that did not parse as a map
pub static VECTOR_TEXT_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    vec![
        ExtractionRule::new(
            "text_single_quoted",
            r#"(?s)\btext['"]?\s*[:=]\s*'(.*?)'\s*(?:[,}>]|$)"#,
        ),
        ExtractionRule::new(
            "text_double_quoted",
            r#"(?s)\btext['"]?\s*[:=]\s*"(.*?)"\s*(?:[,}>]|$)"#,
        ),
    ]
});

/// Delimiter-joined chunk sources of a graph-expansion record
///
/// The record-boundary rules come first: a source list may itself contain quotes, so
/// the field is bounded by the field that follows it where possible.
pub static CHUNK_SOURCES_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    vec![
        ExtractionRule::new(
            "sources_before_relationships",
            r"(?s)chunk_sources='(.*?)'\s*,?\s*truncated_relationship_texts=",
        ),
        ExtractionRule::new(
            "sources_double_quoted_before_relationships",
            r#"(?s)chunk_sources="(.*?)"\s*,?\s*truncated_relationship_texts="#,
        ),
        ExtractionRule::new("sources_before_record_end", r"(?s)chunk_sources='(.*?)'\s*>"),
        ExtractionRule::new(
            "sources_json_field",
            r#""chunk_sources"\s*:\s*"((?:[^"\\]|\\.)*)""#,
        ),
        ExtractionRule::new("sources_any_quote", r#"(?s)chunk_sources=['"](.*?)['"]"#),
    ]
});

/// Delimiter-joined chunk texts of a graph-expansion record
pub static CHUNK_TEXTS_RULES: Lazy<Vec<ExtractionRule>> = Lazy::new(|| {
    vec![
        ExtractionRule::new(
            "texts_before_sources",
            r"(?s)truncated_chunk_texts='(.*?)'\s*,?\s*chunk_sources=",
        ),
        ExtractionRule::new(
            "texts_double_quoted_before_sources",
            r#"(?s)truncated_chunk_texts="(.*?)"\s*,?\s*chunk_sources="#,
        ),
        ExtractionRule::new(
            "texts_json_field",
            r#""truncated_chunk_texts"\s*:\s*"((?:[^"\\]|\\.)*)""#,
        ),
        ExtractionRule::new("texts_any_quote", r#"(?s)truncated_chunk_texts=['"](.*?)['"]"#),
    ]
});

/// Entry separator inside a joined list, printed escaped or as real newlines
static LIST_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\n---\\n|\r?\n---\r?\n").expect("Invalid regex"));

/// Split a joined list into trimmed entries, dropping blank ones
pub fn split_entries(joined: &str) -> Vec<String> {
    LIST_DELIMITER
        .split(joined)
        .map(unescape)
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Undo quote escaping introduced when a record is printed
pub fn unescape(text: &str) -> String {
    text.replace("\\'", "'").replace("\\\"", "\"")
}
