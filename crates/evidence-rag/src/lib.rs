//! evidence-rag: Graph-backed RAG query pipeline with normalized source citations
//!
//! A query is sanitized, matched against a Neo4j knowledge graph with one of three
//! retrieval strategies, answered by an Ollama model from the retrieved context only,
//! and returned with deduplicated, human-readable sources in one of three response
//! contracts. Conversation history is persisted per owner.

pub mod citation;
pub mod config;
pub mod conversation;
pub mod error;
pub mod format;
pub mod generation;
pub mod pipeline;
pub mod providers;
pub mod ranking;
pub mod retrieval;
pub mod server;
pub mod types;

#[cfg(test)]
mod testing;

pub use citation::{SourceExtractor, UrlTable};
pub use config::RagConfig;
pub use error::{Error, Result};
pub use format::ResponseFormatter;
pub use pipeline::{PipelineBuilder, QueryOrchestrator, QueryService};
pub use types::{
    query::{OutputMode, QueryRequest},
    response::{AnswerResult, FormattedResponse},
    RetrievalItem, RetrievalStrategy, Source,
};
