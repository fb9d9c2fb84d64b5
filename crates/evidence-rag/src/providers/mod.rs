//! Provider abstractions for embeddings, LLM and the knowledge graph
//!
//! Trait-based seams so the pipeline can run against Ollama and Neo4j in production
//! and against in-memory fakes in tests.

pub mod embedding;
pub mod knowledge;
pub mod llm;
pub mod neo4j;
pub mod ollama;

pub use embedding::EmbeddingProvider;
pub use knowledge::{CandidateSelection, ExpansionLimits, KnowledgeBackend, KnowledgeSession};
pub use llm::{GenerationRequest, LlmProvider};
pub use neo4j::Neo4jBackend;
pub use ollama::{OllamaEmbedder, OllamaLlm, OllamaProvider};
