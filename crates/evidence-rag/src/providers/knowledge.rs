//! Knowledge backend trait for graph-backed retrieval

use async_trait::async_trait;

use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::types::RetrievalItem;

/// Bounds of a graph expansion around the candidate chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Maximum relationship hops away from a chunk's entities (1 or 2)
    pub hop_limit: u32,
    /// Maximum chunks collected into one record
    pub chunk_limit: usize,
    /// Maximum relationships collected into one record
    pub relationship_limit: usize,
    /// Maximum characters kept per chunk text
    pub chunk_text_limit: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            hop_limit: 2,
            chunk_limit: 10,
            relationship_limit: 20,
            chunk_text_limit: 1000,
        }
    }
}

impl From<&RetrievalConfig> for ExpansionLimits {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            hop_limit: config.hop_limit.clamp(1, 2),
            chunk_limit: config.chunk_limit,
            relationship_limit: config.relationship_limit,
            chunk_text_limit: config.chunk_text_limit,
        }
    }
}

/// How expansion candidates are found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSelection {
    /// Vector similarity only
    Vector,
    /// Vector similarity combined with full-text keyword search
    Hybrid,
}

/// A graph/vector knowledge store
///
/// Implementations:
/// - `Neo4jBackend`: Neo4j over the HTTP transactional API
#[async_trait]
pub trait KnowledgeBackend: Send + Sync {
    /// Open a session scoped to one retrieval call
    async fn connect(&self) -> Result<Box<dyn KnowledgeSession>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// One retrieval call's connection to the knowledge backend
///
/// Callers must `close` the session on every exit path.
#[async_trait]
pub trait KnowledgeSession: Send {
    /// Top-k chunks by vector similarity, one `Vector` item per chunk
    async fn similarity_search(&mut self, query: &str, top_k: usize)
        -> Result<Vec<RetrievalItem>>;

    /// Candidate chunks expanded through the entity graph, as `GraphExpansion` items
    async fn graph_expansion(
        &mut self,
        query: &str,
        top_k: usize,
        limits: &ExpansionLimits,
        candidates: CandidateSelection,
    ) -> Result<Vec<RetrievalItem>>;

    /// Release the session
    async fn close(&mut self) -> Result<()>;
}
