//! Final source deduplication and ranking

use std::collections::HashSet;

use crate::types::Source;

/// Most sources attached to an answer
pub const MAX_SOURCES: usize = 5;

/// Deduplicate by display name (first occurrence wins) and keep the first five
///
/// Retrieval order is the ranking: the backend already returns chunks by score,
/// so no re-scoring happens here.
pub fn finalize(sources: Vec<Source>) -> Vec<Source> {
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|source| seen.insert(source.dedup_key().to_string()))
        .take(MAX_SOURCES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(path: &str, display_name: &str) -> Source {
        Source {
            path: path.to_string(),
            display_name: display_name.to_string(),
            external_url: format!("https://example.org/{}", path),
            content: None,
        }
    }

    #[test]
    fn test_duplicates_collapse_to_first() {
        let sources = vec![
            source("a/Study_One.pdf", "Study One"),
            source("b/Study_One.pdf", "Study One"),
        ];
        let ranked = finalize(sources);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].path, "a/Study_One.pdf");
    }

    #[test]
    fn test_truncates_to_first_five_in_order() {
        let sources: Vec<_> = (1..=7)
            .map(|i| source(&format!("doc{}.pdf", i), &format!("doc{}", i)))
            .collect();
        let ranked = finalize(sources);

        assert_eq!(ranked.len(), MAX_SOURCES);
        let names: Vec<_> = ranked.iter().map(|s| s.display_name.as_str()).collect();
        assert_eq!(names, vec!["doc1", "doc2", "doc3", "doc4", "doc5"]);
    }

    #[test]
    fn test_dedup_happens_before_truncation() {
        let mut sources = vec![source("x.pdf", "x"); 4];
        sources.extend((1..=5).map(|i| source(&format!("{}.pdf", i), &i.to_string())));
        let ranked = finalize(sources);

        assert_eq!(ranked.len(), MAX_SOURCES);
        assert_eq!(ranked[0].display_name, "x");
        assert_eq!(ranked[4].display_name, "4");
    }

    #[test]
    fn test_empty_input() {
        assert!(finalize(Vec::new()).is_empty());
    }
}
