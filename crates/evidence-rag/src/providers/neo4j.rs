//! Neo4j knowledge backend over the HTTP transactional API
//!
//! Each session is one explicit transaction: `connect` opens it, every statement of
//! the retrieval call runs inside it, `close` rolls it back (retrieval never writes).

use async_trait::async_trait;
use reqwest::{header::LOCATION, Client};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::types::RetrievalItem;

use super::embedding::EmbeddingProvider;
use super::knowledge::{CandidateSelection, ExpansionLimits, KnowledgeBackend, KnowledgeSession};

/// List delimiter joining chunk texts, sources and relationships in expansion records
pub const LIST_DELIMITER: &str = "\n---\n";

/// Knowledge backend backed by a Neo4j database with vector and full-text indexes
pub struct Neo4jBackend {
    client: Client,
    config: GraphConfig,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Neo4jBackend {
    /// Create a new backend; no connection is made until `connect`
    pub fn new(config: &GraphConfig, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
            embedder,
        })
    }

    fn base_url(&self) -> &str {
        self.config.uri.trim_end_matches('/')
    }
}

#[async_trait]
impl KnowledgeBackend for Neo4jBackend {
    async fn connect(&self) -> Result<Box<dyn KnowledgeSession>> {
        let url = format!("{}/db/{}/tx", self.base_url(), self.config.database);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&json!({ "statements": [] }))
            .send()
            .await
            .map_err(|e| Error::graph(format!("Failed to open transaction: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::graph(format!(
                "Failed to open transaction: HTTP {}",
                response.status()
            )));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| Error::graph(format!("Failed to parse transaction response: {}", e)))?;
        body.check()?;

        let tx_url = transaction_url(location.as_deref(), body.commit.as_deref())
            .ok_or_else(|| Error::graph("Transaction response carried no transaction URL"))?;
        tracing::debug!(%tx_url, "Opened knowledge graph transaction");

        Ok(Box::new(Neo4jSession {
            client: self.client.clone(),
            config: self.config.clone(),
            embedder: Arc::clone(&self.embedder),
            tx_url,
            closed: false,
        }))
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/", self.base_url());
        match self
            .client
            .get(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "neo4j"
    }
}

/// An open transaction against the database
struct Neo4jSession {
    client: Client,
    config: GraphConfig,
    embedder: Arc<dyn EmbeddingProvider>,
    tx_url: String,
    closed: bool,
}

impl Neo4jSession {
    async fn run(&self, statement: String, parameters: Value) -> Result<Vec<Vec<Value>>> {
        let request = TxRequest {
            statements: vec![Statement {
                statement,
                parameters,
            }],
        };

        let response = self
            .client
            .post(&self.tx_url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::graph(format!("Statement request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::graph(format!(
                "Statement failed: HTTP {}",
                response.status()
            )));
        }

        let body: TxResponse = response
            .json()
            .await
            .map_err(|e| Error::graph(format!("Failed to parse statement response: {}", e)))?;
        body.into_rows()
    }

    fn base_parameters(&self, query: &str, top_k: usize, embedding: Vec<f32>) -> Map<String, Value> {
        let mut parameters = Map::new();
        parameters.insert("vector_index".into(), json!(self.config.vector_index));
        parameters.insert("fulltext_index".into(), json!(self.config.fulltext_index));
        parameters.insert("text_property".into(), json!(self.config.text_property));
        parameters.insert("source_property".into(), json!(self.config.source_property));
        parameters.insert("top_k".into(), json!(top_k));
        parameters.insert("query_text".into(), json!(query));
        parameters.insert("embedding".into(), json!(embedding));
        parameters
    }
}

#[async_trait]
impl KnowledgeSession for Neo4jSession {
    async fn similarity_search(
        &mut self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievalItem>> {
        let embedding = self.embedder.embed(query).await?;
        let parameters = self.base_parameters(query, top_k, embedding);

        let rows = self
            .run(SIMILARITY_QUERY.to_string(), Value::Object(parameters))
            .await?;
        tracing::debug!(rows = rows.len(), "Similarity search returned");

        Ok(rows.iter().map(|row| render_vector_row(row)).collect())
    }

    async fn graph_expansion(
        &mut self,
        query: &str,
        top_k: usize,
        limits: &ExpansionLimits,
        candidates: CandidateSelection,
    ) -> Result<Vec<RetrievalItem>> {
        let embedding = self.embedder.embed(query).await?;
        let mut parameters = self.base_parameters(query, top_k, embedding);
        parameters.insert("chunk_limit".into(), json!(limits.chunk_limit));
        parameters.insert("relationship_limit".into(), json!(limits.relationship_limit));
        parameters.insert("chunk_text_limit".into(), json!(limits.chunk_text_limit));

        let rows = self
            .run(expansion_statement(candidates, limits), Value::Object(parameters))
            .await?;
        tracing::debug!(rows = rows.len(), ?candidates, "Graph expansion returned");

        Ok(rows
            .iter()
            .filter_map(|row| render_expansion_row(row))
            .collect())
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let response = self
            .client
            .delete(&self.tx_url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| Error::graph(format!("Failed to roll back transaction: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::graph(format!(
                "Failed to roll back transaction: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

// ============ Cypher ============

const SIMILARITY_QUERY: &str = "\
CALL db.index.vector.queryNodes($vector_index, $top_k, $embedding) YIELD node, score
RETURN node[$text_property] AS text, node[$source_property] AS source, score";

const VECTOR_CANDIDATES: &str = "\
CALL db.index.vector.queryNodes($vector_index, $top_k, $embedding) YIELD node, score
WITH node, score";

const HYBRID_CANDIDATES: &str = "\
CALL {
  CALL db.index.vector.queryNodes($vector_index, $top_k, $embedding) YIELD node, score
  WITH collect({node: node, score: score}) AS nodes, max(score) AS top
  UNWIND nodes AS n
  RETURN n.node AS node, (n.score / top) AS score
  UNION
  CALL db.index.fulltext.queryNodes($fulltext_index, $query_text, {limit: $top_k}) YIELD node, score
  WITH collect({node: node, score: score}) AS nodes, max(score) AS top
  UNWIND nodes AS n
  RETURN n.node AS node, (n.score / top) AS score
}
WITH node, max(score) AS score ORDER BY score DESC LIMIT $top_k";

/// Expansion from candidate chunks to the relationships of their entities
///
/// Quantified path lengths cannot be parameters, so the hop limit is formatted in.
fn expansion_statement(candidates: CandidateSelection, limits: &ExpansionLimits) -> String {
    let candidates = match candidates {
        CandidateSelection::Vector => VECTOR_CANDIDATES,
        CandidateSelection::Hybrid => HYBRID_CANDIDATES,
    };

    format!(
        "{candidates}
WITH node AS chunk
MATCH (chunk)<-[:FROM_CHUNK]-()-[relList:!FROM_CHUNK]-{{1,{hops}}}()
UNWIND relList AS rel
WITH collect(DISTINCT chunk)[0..$chunk_limit] AS chunks,
     collect(DISTINCT rel)[0..$relationship_limit] AS rels
UNWIND chunks AS c
WITH collect(c[$text_property]) AS chunk_texts, collect(c[$source_property]) AS chunk_sources, rels
UNWIND rels AS r
WITH chunk_texts, chunk_sources,
     collect(startNode(r).name + ' - ' + type(r) + '(' + coalesce(r.details, '') + ')' + ' -> ' + endNode(r).name) AS rel_texts
RETURN
  reduce(s = '', t IN chunk_texts | s + CASE WHEN s = '' THEN '' ELSE '{delim}' END + substring(t, 0, $chunk_text_limit)) AS truncated_chunk_texts,
  reduce(s = '', t IN chunk_sources | s + CASE WHEN s = '' THEN '' ELSE '{delim}' END + t) AS chunk_sources,
  reduce(s = '', t IN rel_texts | s + CASE WHEN s = '' THEN '' ELSE '{delim}' END + t) AS truncated_relationship_texts",
        candidates = candidates,
        hops = limits.hop_limit.clamp(1, 2),
        delim = r"\n---\n",
    )
}

// ============ Payload rendering ============

/// Similarity row `[text, source, score]` as a JSON map payload
fn render_vector_row(row: &[Value]) -> RetrievalItem {
    let field = |idx: usize| row.get(idx).cloned().unwrap_or(Value::Null);
    RetrievalItem::Vector(json!({ "text": field(0), "source2": field(1) }).to_string())
}

/// Expansion row `[texts, sources, relationships]` as a record payload
///
/// Delimiters are written escaped and quotes inside values are backslash-escaped.
fn render_expansion_row(row: &[Value]) -> Option<RetrievalItem> {
    let field = |idx: usize| {
        row.get(idx)
            .and_then(Value::as_str)
            .map(escape_record_value)
            .unwrap_or_default()
    };

    let sources = field(1);
    if sources.is_empty() {
        return None;
    }

    Some(RetrievalItem::GraphExpansion(format!(
        "<Record truncated_chunk_texts='{}' chunk_sources='{}' truncated_relationship_texts='{}'>",
        field(0),
        sources,
        field(2)
    )))
}

fn escape_record_value(value: &str) -> String {
    value
        .replace(LIST_DELIMITER, r"\n---\n")
        .replace(['\r', '\n'], " ")
        .replace('\'', r"\'")
}

// ============ Wire types ============

#[derive(Debug, Serialize)]
struct TxRequest {
    statements: Vec<Statement>,
}

#[derive(Debug, Serialize)]
struct Statement {
    statement: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    commit: Option<String>,
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<ServerError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    #[serde(default)]
    data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    #[serde(default)]
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    code: String,
    message: String,
}

impl TxResponse {
    fn check(&self) -> Result<()> {
        match self.errors.first() {
            Some(error) => Err(Error::graph(format!("{}: {}", error.code, error.message))),
            None => Ok(()),
        }
    }

    fn into_rows(self) -> Result<Vec<Vec<Value>>> {
        self.check()?;
        Ok(self
            .results
            .into_iter()
            .flat_map(|result| result.data)
            .map(|data| data.row)
            .collect())
    }
}

/// Transaction URL from the `Location` header, or derived from the commit URL
fn transaction_url(location: Option<&str>, commit: Option<&str>) -> Option<String> {
    location
        .map(str::to_string)
        .or_else(|| commit.and_then(|c| c.strip_suffix("/commit")).map(str::to_string))
}
