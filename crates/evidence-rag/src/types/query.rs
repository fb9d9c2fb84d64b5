//! Query request types

use serde::{Deserialize, Serialize};

/// Query request body accepted by the query endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// The question to answer
    pub query: String,

    /// Continue an existing conversation (a new one is created when absent)
    #[serde(default)]
    pub conversation_id: Option<i64>,
}

impl QueryRequest {
    /// Create a new query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            conversation_id: None,
        }
    }

    /// Continue the given conversation
    pub fn in_conversation(mut self, conversation_id: i64) -> Self {
        self.conversation_id = Some(conversation_id);
        self
    }
}

/// Response contract a query result is projected into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Answer, source path/name pairs and the conversation id
    #[default]
    Raw,
    /// Answer with up to five sources carrying a single snippet each
    StandardRag,
    /// Answer with a collapsible sources panel
    Ui,
}
