//! Retrieval results as returned by the knowledge backend

use serde::{Deserialize, Serialize};

/// A single retrieval result, tagged by the payload shape its strategy produces
///
/// The payloads are opaque text: the backend decides how a record is rendered,
/// the citation extractor decides how much of it can be understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum RetrievalItem {
    /// One chunk rendered as a map-like text with text and source-path fields
    Vector(String),
    /// One expansion record embedding delimiter-joined chunk texts, chunk sources
    /// and relationship descriptions
    GraphExpansion(String),
}

impl RetrievalItem {
    /// Raw payload text
    pub fn content(&self) -> &str {
        match self {
            Self::Vector(content) | Self::GraphExpansion(content) => content,
        }
    }

    /// Whether the payload carries any non-whitespace text
    pub fn has_content(&self) -> bool {
        !self.content().trim().is_empty()
    }
}

/// Outcome of one retrieval attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// Items with usable content
    Hit(Vec<RetrievalItem>),
    /// Nothing usable came back (no items, only blank items, or a backend failure)
    Empty,
}

impl RetrievalOutcome {
    /// Classify a list of items
    pub fn from_items(items: Vec<RetrievalItem>) -> Self {
        if items.iter().any(RetrievalItem::has_content) {
            Self::Hit(items)
        } else {
            Self::Empty
        }
    }

    /// Whether this outcome is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
