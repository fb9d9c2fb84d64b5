//! Response types for RAG queries

use serde::{Deserialize, Serialize};

use super::source::Source;

/// Answer returned for every query while the backends are unavailable
pub const DEGRADED_ANSWER: &str = "I'm sorry, but there was an issue connecting to the knowledge graph. \
Please check the knowledge backend and generation backend configuration.";

/// Answer returned when retrieval produced nothing to ground an answer on,
/// or when the pipeline failed unexpectedly
pub const NO_EVIDENCE_ANSWER: &str =
    "I don't have enough evidence in the current knowledge base to answer.";

/// Prefix of the answer returned when the generation backend fails
pub const GENERATION_FAILURE_ANSWER: &str = "I'm sorry, I encountered an error when processing your query. \
Please try a different question without special characters.";

/// Longest technical note appended to a generation-failure answer
const MAX_TECHNICAL_NOTE_CHARS: usize = 200;

/// Terminal output of one query cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Generated (or fallback) answer
    pub answer: String,
    /// At most five deduplicated sources, in encounter order
    pub sources: Vec<Source>,
    /// Conversation the query belongs to
    pub conversation_id: i64,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, sources: Vec<Source>, conversation_id: i64) -> Self {
        Self {
            answer: answer.into(),
            sources,
            conversation_id,
        }
    }

    /// Fixed apology used in degraded mode
    pub fn degraded(conversation_id: i64) -> Self {
        Self::new(DEGRADED_ANSWER, Vec::new(), conversation_id)
    }

    /// Safe fallback for empty retrieval and unexpected failures
    pub fn no_evidence(conversation_id: i64) -> Self {
        Self::new(NO_EVIDENCE_ANSWER, Vec::new(), conversation_id)
    }

    /// Apology with a short technical note for a failed completion call
    pub fn generation_failure(conversation_id: i64, note: &str) -> Self {
        let mut note: String = note.chars().take(MAX_TECHNICAL_NOTE_CHARS).collect();
        if note.trim().is_empty() {
            note = "unknown error".to_string();
        }
        Self::new(
            format!("{} Technical details: {}", GENERATION_FAILURE_ANSWER, note),
            Vec::new(),
            conversation_id,
        )
    }
}

// ============ Raw contract ============

/// Source as exposed by the raw contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    pub source_path: String,
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// Raw response: answer, sources and conversation id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResponse {
    pub answer: String,
    pub sources: Vec<RawSource>,
    pub conversation_id: i64,
}

// ============ Standard RAG contract ============

/// Source in the standard RAG contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagSource {
    /// Raw source path
    pub path: String,
    /// Source file name
    pub title: String,
    /// Always null in this contract
    pub url: Option<String>,
    /// Exactly one verbatim snippet
    pub snippets: Vec<String>,
}

/// Standard RAG response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RagResponse {
    pub answer: String,
    pub sources: Vec<RagSource>,
}

// ============ UI contract ============

/// Expanded view of a source with detailed information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedSourceView {
    pub exact_passage: String,
    pub location: String,
    pub why_it_supports: String,
}

/// A source item with collapsed and expanded views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub title: String,
    pub source: String,
    pub expanded: ExpandedSourceView,
}

/// Presentation settings for the sources panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSettings {
    pub max_width: String,
    pub padding: String,
    pub overflow: String,
    pub text_wrap: String,
    pub scroll_inside_expanded: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            max_width: "100%".to_string(),
            padding: "1em".to_string(),
            overflow: "hidden".to_string(),
            text_wrap: "normal".to_string(),
            scroll_inside_expanded: true,
        }
    }
}

/// The collapsible sources panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesPanel {
    pub title: String,
    pub ui: UiSettings,
    pub items: Vec<SourceItem>,
}

/// Answer with a UI-optimized sources panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiRagResponse {
    pub answer: String,
    #[serde(rename = "SOURCES_PANEL")]
    pub sources_panel: SourcesPanel,
}

/// A query result projected into one of the response contracts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedResponse {
    Raw(RawResponse),
    StandardRag(RagResponse),
    Ui(UiRagResponse),
}

impl FormattedResponse {
    /// Answer text regardless of contract
    pub fn answer(&self) -> &str {
        match self {
            Self::Raw(r) => &r.answer,
            Self::StandardRag(r) => &r.answer,
            Self::Ui(r) => &r.answer,
        }
    }
}
