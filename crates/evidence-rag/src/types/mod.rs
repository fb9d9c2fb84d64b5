//! Core types for the RAG system

pub mod conversation;
pub mod query;
pub mod response;
pub mod retrieval;
pub mod source;
pub mod strategy;

pub use conversation::{Conversation, ConversationContext, Message, Role, Turn};
pub use query::{OutputMode, QueryRequest};
pub use response::{
    AnswerResult, ExpandedSourceView, FormattedResponse, RagResponse, RagSource, RawResponse,
    RawSource, SourceItem, SourcesPanel, UiRagResponse, UiSettings,
};
pub use retrieval::{RetrievalItem, RetrievalOutcome};
pub use source::Source;
pub use strategy::RetrievalStrategy;
