//! Retrieval strategy selection values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Retrieval mode used against the knowledge backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    /// Vector similarity search only
    Vector,
    /// Vector similarity search followed by graph expansion
    VectorCypher,
    /// Vector + full-text candidate selection followed by graph expansion
    Hybrid,
}

impl RetrievalStrategy {
    /// All strategies, in documentation order
    pub const ALL: [RetrievalStrategy; 3] = [Self::Vector, Self::VectorCypher, Self::Hybrid];

    /// Wire name of the strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::VectorCypher => "vector_cypher",
            Self::Hybrid => "hybrid",
        }
    }

    /// Whether this strategy runs graph expansion
    pub fn expands_graph(&self) -> bool {
        !matches!(self, Self::Vector)
    }
}

impl fmt::Display for RetrievalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector" => Ok(Self::Vector),
            "vector_cypher" => Ok(Self::VectorCypher),
            "hybrid" | "hybrid_cypher" => Ok(Self::Hybrid),
            other => Err(Error::InvalidRequest(format!(
                "Unknown retrieval strategy: {}",
                other
            ))),
        }
    }
}
