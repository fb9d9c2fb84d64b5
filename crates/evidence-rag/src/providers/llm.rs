//! LLM provider trait for grounded completions

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::types::Turn;

/// A single completion request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    /// Prior conversation turns, oldest first
    pub history: Vec<Turn>,
    /// The filled-in RAG prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Trait for LLM-based answer generation
///
/// Implementations:
/// - `OllamaLlm`: Local Ollama server (llama3.1, phi3, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete the prompt after replaying the history turns in order
    async fn complete(&self, request: &GenerationRequest) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
