//! Source-path to external-URL resolution

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

use super::catalog::KNOWN_SOURCES;
use super::display::file_name;

/// Shortest stem that may take part in a partial match
const MIN_PARTIAL_MATCH_CHARS: usize = 8;

/// Copy markers such as `(2)` in catalogued file names
static COPY_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)").expect("Invalid regex"));

/// A catalogued document as listed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone)]
struct UrlEntry {
    key: String,
    normalized_stem: String,
    url: String,
}

impl UrlEntry {
    fn new(key: &str, url: &str) -> Self {
        Self {
            key: key.to_string(),
            normalized_stem: normalize_stem(key),
            url: url.to_string(),
        }
    }
}

/// Lookup table mapping source file names to document URLs
///
/// Resolution order: exact key match on the file name or the full path, then a
/// case-insensitive substring match in either direction, then a search link
/// built from the display name.
#[derive(Debug, Clone)]
pub struct UrlTable {
    entries: Vec<UrlEntry>,
    search_url_base: String,
}

impl UrlTable {
    /// Built-in catalogue extended (and overridden) by `extra`
    pub fn new(extra: &HashMap<String, String>, search_url_base: impl Into<String>) -> Self {
        let mut custom: Vec<_> = extra.iter().collect();
        custom.sort_by(|a, b| a.0.cmp(b.0));

        let mut entries: Vec<UrlEntry> = custom
            .into_iter()
            .map(|(key, url)| UrlEntry::new(key, url))
            .collect();
        entries.extend(
            KNOWN_SOURCES
                .iter()
                .filter(|(key, _)| !extra.contains_key(*key))
                .map(|(key, url)| UrlEntry::new(key, url)),
        );

        Self {
            entries,
            search_url_base: search_url_base.into(),
        }
    }

    /// Built-in catalogue only
    pub fn builtin(search_url_base: impl Into<String>) -> Self {
        Self::new(&HashMap::new(), search_url_base)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Catalogued URL for a path, if any
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let name = file_name(path);
        let path = path.trim();

        if let Some(entry) = self.entries.iter().find(|e| e.key == name || e.key == path) {
            return Some(&entry.url);
        }

        let stem = normalize_stem(name);
        if stem.chars().count() < MIN_PARTIAL_MATCH_CHARS {
            return None;
        }

        self.entries
            .iter()
            .find(|e| {
                e.normalized_stem.chars().count() >= MIN_PARTIAL_MATCH_CHARS
                    && (e.normalized_stem.contains(&stem) || stem.contains(&e.normalized_stem))
            })
            .map(|e| e.url.as_str())
    }

    /// Catalogued URL, or a search link for the display name
    pub fn resolve(&self, path: &str, display_name: &str) -> String {
        match self.lookup(path) {
            Some(url) => url.to_string(),
            None => self.search_url(display_name),
        }
    }

    /// Search link for a document that is not catalogued
    pub fn search_url(&self, display_name: &str) -> String {
        format!(
            "{}{}",
            self.search_url_base,
            urlencoding::encode(display_name.trim())
        )
    }

    /// Catalogue listing sorted by title, optionally filtered by a case-insensitive term
    pub fn catalog(&self, filter: Option<&str>) -> Vec<CatalogEntry> {
        let filter = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        let mut listing: Vec<CatalogEntry> = self
            .entries
            .iter()
            .map(|e| CatalogEntry {
                title: catalog_title(&e.key),
                url: e.url.clone(),
            })
            .filter(|entry| match &filter {
                Some(term) => entry.title.to_lowercase().contains(term.as_str()),
                None => true,
            })
            .collect();

        listing.sort_by_key(|entry| entry.title.to_lowercase());
        listing
    }
}

fn normalize_stem(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stem = match lowered.rfind('.') {
        Some(idx) if idx > 0 => &lowered[..idx],
        _ => lowered.as_str(),
    };
    stem.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn catalog_title(key: &str) -> String {
    let title = key.strip_suffix(".pdf").unwrap_or(key).replace('_', " ");
    COPY_MARKER
        .replace(&title, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH: &str = "https://www.google.com/search?q=";

    #[test]
    fn test_exact_match_on_file_name() {
        let table = UrlTable::builtin(SEARCH);
        assert_eq!(
            table.resolve(
                "/data/A Clinical Severity Index for Eosinophilic Esophagitis.pdf",
                "A Clinical Severity Index for Eosinophilic Esophagitis"
            ),
            "https://rdcrn.app.box.com/file/1806944500611"
        );
    }

    #[test]
    fn test_partial_match_is_case_insensitive() {
        let table = UrlTable::builtin(SEARCH);
        assert_eq!(
            table.lookup("docs/local_type_2_IMMUNITY_in_eosinophilic_gastritis.pdf"),
            Some("https://rdcrn.app.box.com/file/1806947457540")
        );
        // Catalogued key contained in the path stem
        assert_eq!(
            table.lookup("Molecular analysis of duodenal eosinophilia - supplementary.pdf"),
            Some("https://rdcrn.app.box.com/file/1806947303831")
        );
    }

    #[test]
    fn test_short_stems_do_not_partially_match() {
        let table = UrlTable::builtin(SEARCH);
        assert_eq!(table.lookup("a.pdf"), None);
    }

    #[test]
    fn test_unknown_source_gets_search_url() {
        let table = UrlTable::builtin(SEARCH);
        assert_eq!(
            table.resolve("unlisted/Study_One.pdf", "Study One"),
            "https://www.google.com/search?q=Study%20One"
        );
    }

    #[test]
    fn test_configured_entries_take_precedence() {
        let mut extra = HashMap::new();
        extra.insert(
            "Dilation of Pediatric Eosinophilic Esophagitis.pdf".to_string(),
            "https://example.org/dilation".to_string(),
        );
        extra.insert("Study_One.pdf".to_string(), "https://example.org/one".to_string());

        let table = UrlTable::new(&extra, SEARCH);
        assert_eq!(table.len(), KNOWN_SOURCES.len() + 1);
        assert_eq!(
            table.lookup("Dilation of Pediatric Eosinophilic Esophagitis.pdf"),
            Some("https://example.org/dilation")
        );
        assert_eq!(table.resolve("x/Study_One.pdf", "Study One"), "https://example.org/one");
    }

    #[test]
    fn test_catalog_listing() {
        let table = UrlTable::builtin(SEARCH);
        let all = table.catalog(None);
        assert_eq!(all.len(), KNOWN_SOURCES.len());
        assert!(all
            .windows(2)
            .all(|w| w[0].title.to_lowercase() <= w[1].title.to_lowercase()));
        assert!(all.iter().any(|e| e.title == "Eosinophilic Esophagitis"));

        let filtered = table.catalog(Some("GASTRITIS"));
        assert_eq!(filtered.len(), 2);
    }
}
