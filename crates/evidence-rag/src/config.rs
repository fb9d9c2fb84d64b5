//! Configuration for the RAG system

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::RetrievalStrategy;

/// Environment variable naming a TOML configuration file
pub const CONFIG_PATH_ENV: &str = "EVIDENCE_RAG_CONFIG";

/// Main RAG system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Knowledge graph (Neo4j) configuration
    pub graph: GraphConfig,
    /// Retrieval strategy and expansion limits
    pub retrieval: RetrievalConfig,
    /// Answer generation configuration
    pub generation: GenerationConfig,
    /// Source attribution configuration
    pub sources: SourcesConfig,
    /// Conversation store configuration
    pub conversations: ConversationConfig,
}

impl RagConfig {
    /// Parse a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Load configuration from `EVIDENCE_RAG_CONFIG` (if set) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!("Loading configuration from {}", path);
                Self::from_file(path)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply well-known environment variables on top of the current values
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(uri) = get("NEO4J_URI") {
            self.graph.uri = uri;
        }
        if let Some(username) = get("NEO4J_USERNAME") {
            self.graph.username = username;
        }
        if let Some(password) = get("NEO4J_PASSWORD") {
            self.graph.password = password;
        }
        if let Some(database) = get("NEO4J_DATABASE") {
            self.graph.database = database;
        }
        if let Some(base_url) = get("OLLAMA_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = get("LLM_MODEL") {
            self.llm.generate_model = model;
        }
        if let Some(model) = get("EMBED_MODEL") {
            self.llm.embed_model = model;
        }
        if let Some(strategy) = get("RETRIEVER_TYPE") {
            // Unknown values keep the configured default
            match strategy.parse::<RetrievalStrategy>() {
                Ok(parsed) => self.retrieval.default_strategy = Some(parsed),
                Err(_) => tracing::warn!("Ignoring unknown RETRIEVER_TYPE '{}'", strategy),
            }
        }
        if let Some(port) = get("EVIDENCE_RAG_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Check that the required backend settings are present
    pub fn validate(&self) -> Result<()> {
        if self.graph.uri.trim().is_empty() {
            return Err(Error::config("graph.uri is not set"));
        }
        if self.graph.database.trim().is_empty() {
            return Err(Error::config("graph.database is not set"));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(Error::config("llm.base_url is not set"));
        }
        if self.llm.generate_model.trim().is_empty() || self.llm.embed_model.trim().is_empty() {
            return Err(Error::config("llm model names must not be empty"));
        }
        if self.graph.top_k == 0 {
            return Err(Error::config("graph.top_k must be at least 1"));
        }
        if !(1..=2).contains(&self.retrieval.hop_limit) {
            return Err(Error::config("retrieval.hop_limit must be 1 or 2"));
        }
        if self.retrieval.chunk_limit == 0 || self.retrieval.relationship_limit == 0 {
            return Err(Error::config("retrieval limits must be at least 1"));
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            enable_cors: true,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Number of retries for failed embedding requests
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "llama3.1".to_string(),
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding dimensions (768 for nomic-embed-text)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dimensions: 768 }
    }
}

/// Neo4j knowledge graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// HTTP endpoint of the Neo4j server
    pub uri: String,
    /// Database name
    pub database: String,
    /// Username for basic auth
    pub username: String,
    /// Password for basic auth
    #[serde(skip_serializing)]
    pub password: String,
    /// Vector index over chunk embeddings
    pub vector_index: String,
    /// Full-text index over chunk text (hybrid strategy)
    pub fulltext_index: String,
    /// Chunk property holding the text
    pub text_property: String,
    /// Chunk property holding the source document path
    pub source_property: String,
    /// Number of candidate chunks per search
    pub top_k: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "http://localhost:7474".to_string(),
            database: "neo4j".to_string(),
            username: "neo4j".to_string(),
            password: "password".to_string(),
            vector_index: "text_embeddings".to_string(),
            fulltext_index: "text_embeddings2".to_string(),
            text_property: "text".to_string(),
            source_property: "source2".to_string(),
            top_k: 5,
            timeout_secs: 60,
        }
    }
}

/// Retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Process-wide default strategy (falls back to hybrid when unset)
    pub default_strategy: Option<RetrievalStrategy>,
    /// Maximum hops for graph expansion
    pub hop_limit: u32,
    /// Maximum chunks collected by graph expansion
    pub chunk_limit: usize,
    /// Maximum relationships collected by graph expansion
    pub relationship_limit: usize,
    /// Characters kept from each chunk text in expansion payloads
    pub chunk_text_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_strategy: None,
            hop_limit: 2,
            chunk_limit: 10,
            relationship_limit: 20,
            chunk_text_limit: 1000,
        }
    }
}

/// Answer generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Send prior conversation turns ahead of the grounded prompt
    pub include_history: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            include_history: true,
        }
    }
}

/// Source attribution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Base of the search URL synthesized when a source has no table entry
    pub search_url_base: String,
    /// Extra filename -> URL entries merged over the built-in table
    pub urls: HashMap<String, String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            search_url_base: "https://www.google.com/search?q=".to_string(),
            urls: HashMap::new(),
        }
    }
}

/// Conversation store backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConversationBackend {
    /// SQLite database on disk
    #[default]
    Sqlite,
    /// Process memory (lost on restart)
    Memory,
}

/// Conversation store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Which store to use
    pub backend: ConversationBackend,
    /// Database path for the SQLite store
    pub storage_path: PathBuf,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        // Use absolute path to avoid depending on the working directory
        let storage_path = dirs::data_local_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")))
            .join("evidence-rag")
            .join("conversations.db");

        Self {
            backend: ConversationBackend::Sqlite,
            storage_path,
        }
    }
}
