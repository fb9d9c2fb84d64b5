//! Source extraction from retrieval payloads

use serde_json::Value;
use std::collections::HashSet;

use super::display::display_name;
use super::rules::{
    first_capture, split_entries, unescape, CHUNK_SOURCES_RULES, CHUNK_TEXTS_RULES,
    VECTOR_SOURCE_KEYS, VECTOR_SOURCE_RULES, VECTOR_TEXT_KEY, VECTOR_TEXT_RULES,
};
use super::url_table::UrlTable;
use crate::types::{RetrievalItem, Source};

/// Longest passage kept on a source
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Turns heterogeneous retrieval payloads into canonical sources
///
/// Extraction never fails: payloads that cannot be understood are skipped.
#[derive(Debug, Clone)]
pub struct SourceExtractor {
    urls: UrlTable,
}

impl SourceExtractor {
    pub fn new(urls: UrlTable) -> Self {
        Self { urls }
    }

    pub fn url_table(&self) -> &UrlTable {
        &self.urls
    }

    /// Extract sources from retrieval items, deduplicated by display name
    ///
    /// Order follows the items and, inside a graph-expansion record, the listed
    /// chunk sources. The first occurrence of a display name wins.
    pub fn extract(&self, items: &[RetrievalItem]) -> Vec<Source> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();

        for item in items {
            let extracted = match item {
                RetrievalItem::Vector(content) => self.extract_vector(content).into_iter().collect(),
                RetrievalItem::GraphExpansion(content) => self.extract_graph(content),
            };

            for source in extracted {
                if seen.insert(source.display_name.clone()) {
                    sources.push(source);
                }
            }
        }

        tracing::debug!(items = items.len(), sources = sources.len(), "Extracted sources");
        sources
    }

    /// Build a source for a path, or `None` when the path is blank
    pub fn build_source(&self, path: &str, content: Option<String>) -> Option<Source> {
        let path = path.trim();
        if path.is_empty() {
            return None;
        }

        let display_name = display_name(path);
        let external_url = self.urls.resolve(path, &display_name);

        Some(Source {
            path: path.to_string(),
            display_name,
            external_url,
            content: content.and_then(bound_content),
        })
    }

    fn extract_vector(&self, content: &str) -> Option<Source> {
        let (path, text) = match parse_map(content) {
            Some(fields) => fields,
            None => {
                let path = first_capture(&VECTOR_SOURCE_RULES, content)
                    .map(|(_, path)| unescape(path));
                let text = first_capture(&VECTOR_TEXT_RULES, content)
                    .map(|(_, text)| unescape(text));
                (path, text)
            }
        };

        let text = text.filter(|t| !t.trim().is_empty());
        match (path, text) {
            (Some(path), Some(text)) => self.build_source(&path, Some(text)),
            _ => {
                tracing::debug!("Vector payload without a source path or text, skipping");
                None
            }
        }
    }

    fn extract_graph(&self, content: &str) -> Vec<Source> {
        let Some((rule, joined)) = first_capture(&CHUNK_SOURCES_RULES, content) else {
            tracing::debug!("Graph payload without chunk sources, skipping");
            return Vec::new();
        };
        tracing::trace!(rule, "Matched chunk sources");

        let paths = split_entries(&field_text(rule, joined));
        let texts = first_capture(&CHUNK_TEXTS_RULES, content)
            .map(|(rule, joined)| split_entries(&field_text(rule, joined)))
            .unwrap_or_default();

        // Texts pair with sources by position; sources past the end of the text list get none
        paths
            .iter()
            .enumerate()
            .filter_map(|(idx, path)| self.build_source(path, texts.get(idx).cloned()))
            .collect()
    }
}

/// Read text and source fields out of a map-like payload
///
/// Accepts JSON objects and Python-style dict reprs that become JSON once single
/// quotes are swapped for double quotes.
fn parse_map(content: &str) -> Option<(Option<String>, Option<String>)> {
    let trimmed = content.trim();
    if !trimmed.starts_with('{') {
        return None;
    }

    let value: Value = serde_json::from_str(trimmed)
        .or_else(|_| serde_json::from_str(&trimmed.replace('\'', "\"")))
        .ok()?;
    let map = value.as_object()?;

    let path = VECTOR_SOURCE_KEYS
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty()))
        .map(str::to_string);
    let text = map
        .get(VECTOR_TEXT_KEY)
        .and_then(Value::as_str)
        .map(str::to_string);

    // A map without a source is still a parse, the regex rules cannot do better
    Some((path, text))
}

/// Captured field text, decoding JSON string escapes when the rule read a JSON field
fn field_text(rule: &str, captured: &str) -> String {
    if rule.ends_with("json_field") {
        serde_json::from_str::<String>(&format!("\"{}\"", captured))
            .unwrap_or_else(|_| captured.to_string())
    } else {
        captured.to_string()
    }
}

fn bound_content(text: String) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_CONTENT_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> SourceExtractor {
        SourceExtractor::new(UrlTable::builtin("https://www.google.com/search?q="))
    }

    #[test]
    fn test_vector_json_payload() {
        let items = vec![RetrievalItem::Vector(
            r#"{"text": "the treatment is X.", "source2": "A_B.pdf"}"#.into(),
        )];
        let sources = extractor().extract(&items);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, "A_B.pdf");
        assert_eq!(sources[0].display_name, "A B");
        assert_eq!(sources[0].content.as_deref(), Some("the treatment is X."));
        assert_eq!(sources[0].external_url, "https://www.google.com/search?q=A%20B");
    }

    #[test]
    fn test_vector_python_repr_payloads() {
        let items = vec![
            RetrievalItem::Vector("{'text': 'plain text', 'source2': 'docs/one.pdf'}".into()),
            RetrievalItem::Vector(r#"{'text': "it's quoted", 'source2': 'docs/two.pdf'}"#.into()),
        ];
        let sources = extractor().extract(&items);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].content.as_deref(), Some("plain text"));
        assert_eq!(sources[1].path, "docs/two.pdf");
        assert_eq!(sources[1].content.as_deref(), Some("it's quoted"));
    }

    #[test]
    fn test_unusable_payloads_are_skipped() {
        let items = vec![
            RetrievalItem::Vector("no structure at all".into()),
            RetrievalItem::Vector(r#"{"text": "orphan passage"}"#.into()),
            RetrievalItem::Vector(r#"{"text": "x", "source2": "   "}"#.into()),
            RetrievalItem::GraphExpansion("<Record relationships='a - R -> b'>".into()),
        ];
        assert!(extractor().extract(&items).is_empty());
    }

    #[test]
    fn test_vector_payloads_without_text_are_skipped() {
        let items = vec![
            RetrievalItem::Vector(r#"{"source2": "docs/No_Text.pdf"}"#.into()),
            RetrievalItem::Vector(r#"{"text": null, "source2": "docs/Null_Text.pdf"}"#.into()),
            RetrievalItem::Vector(r#"{"text": "  ", "source2": "docs/Blank_Text.pdf"}"#.into()),
            RetrievalItem::Vector("source2='docs/Bare.pdf'".into()),
        ];
        assert!(extractor().extract(&items).is_empty());
    }

    #[test]
    fn test_graph_record_pairs_texts_with_sources() {
        let record = r"<Record truncated_chunk_texts='First passage.\n---\nSecond passage.' chunk_sources='dir/Study_One.pdf\n---\ndir/Study_Two.pdf' truncated_relationship_texts='EoE - TREATED_BY(first line) -> PPI'>";
        let sources = extractor().extract(&[RetrievalItem::GraphExpansion(record.into())]);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].display_name, "Study One");
        assert_eq!(sources[0].content.as_deref(), Some("First passage."));
        assert_eq!(sources[1].display_name, "Study Two");
        assert_eq!(sources[1].content.as_deref(), Some("Second passage."));
    }

    #[test]
    fn test_graph_record_with_short_text_list() {
        let record = r"<Record truncated_chunk_texts='Only one.' chunk_sources='a_paper.pdf\n---\nb_paper.pdf' truncated_relationship_texts=''>";
        let sources = extractor().extract(&[RetrievalItem::GraphExpansion(record.into())]);

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].content.as_deref(), Some("Only one."));
        assert_eq!(sources[1].content, None);
    }

    #[test]
    fn test_graph_json_payload() {
        let payload = r#"{"truncated_chunk_texts": "A \"quoted\" passage", "chunk_sources": "Study_One.pdf"}"#;
        let sources = extractor().extract(&[RetrievalItem::GraphExpansion(payload.into())]);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].content.as_deref(), Some("A \"quoted\" passage"));
    }

    #[test]
    fn test_duplicate_display_names_keep_first() {
        let items = vec![
            RetrievalItem::Vector(r#"{"text": "first", "source2": "a/Study_One.pdf"}"#.into()),
            RetrievalItem::Vector(r#"{"text": "second", "source2": "b/Study One.docx"}"#.into()),
        ];
        let sources = extractor().extract(&items);

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].path, "a/Study_One.pdf");
        assert_eq!(sources[0].content.as_deref(), Some("first"));
    }

    #[test]
    fn test_extracted_sources_are_well_formed() {
        let items = vec![
            RetrievalItem::Vector(r#"{"text": "t", "source2": "x/y/z.pdf"}"#.into()),
            RetrievalItem::GraphExpansion(
                r"chunk_sources='p.pdf\n---\n\n---\nq.pdf' truncated_relationship_texts=''".into(),
            ),
            RetrievalItem::Vector("garbage".into()),
        ];
        let entries = 4;
        let sources = extractor().extract(&items);

        assert!(sources.len() <= entries);
        for source in &sources {
            assert!(!source.path.is_empty());
            assert!(!source.display_name.is_empty());
            assert!(!source.external_url.is_empty());
        }
    }

    #[test]
    fn test_content_is_bounded() {
        let long = "word ".repeat(1000);
        let payload = serde_json::json!({"text": long, "source2": "long.pdf"}).to_string();
        let sources = extractor().extract(&[RetrievalItem::Vector(payload)]);
        assert!(sources[0].content.as_ref().unwrap().chars().count() <= MAX_CONTENT_CHARS);
    }
}
