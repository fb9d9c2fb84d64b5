//! Canonical citation record

use serde::{Deserialize, Serialize};

/// A deduplicated, user-facing citation built from retrieval payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Raw source path as stored in the knowledge graph (identity of the document)
    pub path: String,
    /// Human-readable name derived from the path (dedup key)
    pub display_name: String,
    /// Link to the document, or a search link when the document is not catalogued
    pub external_url: String,
    /// Passage that was retrieved for this source, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Source {
    /// Final path segment, accepting both `/` and `\` separators
    pub fn file_name(&self) -> &str {
        crate::citation::display::file_name(&self.path)
    }

    /// Dedup key for this source
    pub fn dedup_key(&self) -> &str {
        &self.display_name
    }
}
