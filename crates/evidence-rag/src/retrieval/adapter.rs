//! Strategy-specific retrieval against the knowledge backend

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::error::Result;
use crate::providers::{CandidateSelection, ExpansionLimits, KnowledgeBackend, KnowledgeSession};
use crate::types::{RetrievalItem, RetrievalOutcome, RetrievalStrategy};

/// Runs one retrieval call per invocation on a fresh backend session
///
/// Backend failures never escape: they are logged and reported as no items. The
/// session is closed on every path, including a panic inside the backend.
pub struct RetrievalAdapter {
    backend: Arc<dyn KnowledgeBackend>,
    top_k: usize,
    limits: ExpansionLimits,
}

impl RetrievalAdapter {
    pub fn new(backend: Arc<dyn KnowledgeBackend>, top_k: usize, limits: ExpansionLimits) -> Self {
        Self {
            backend,
            top_k,
            limits,
        }
    }

    pub fn backend(&self) -> &Arc<dyn KnowledgeBackend> {
        &self.backend
    }

    /// Retrieve items for an already sanitized query
    pub async fn retrieve(&self, strategy: RetrievalStrategy, query: &str) -> Vec<RetrievalItem> {
        let mut session = match self.backend.connect().await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(backend = self.backend.name(), "Retrieval connect failed: {}", e);
                return Vec::new();
            }
        };

        let search = AssertUnwindSafe(self.search(session.as_mut(), strategy, query))
            .catch_unwind()
            .await;

        if let Err(e) = session.close().await {
            tracing::warn!(backend = self.backend.name(), "Failed to close retrieval session: {}", e);
        }

        match search {
            Ok(Ok(items)) => {
                tracing::debug!(%strategy, items = items.len(), "Retrieval complete");
                items
            }
            Ok(Err(e)) => {
                tracing::warn!(%strategy, "Retrieval failed: {}", e);
                Vec::new()
            }
            Err(_) => {
                tracing::error!(%strategy, "Retrieval panicked");
                Vec::new()
            }
        }
    }

    /// Retrieve and classify the result
    pub async fn retrieve_outcome(&self, strategy: RetrievalStrategy, query: &str) -> RetrievalOutcome {
        RetrievalOutcome::from_items(self.retrieve(strategy, query).await)
    }

    async fn search(
        &self,
        session: &mut dyn KnowledgeSession,
        strategy: RetrievalStrategy,
        query: &str,
    ) -> Result<Vec<RetrievalItem>> {
        match strategy {
            RetrievalStrategy::Vector => session.similarity_search(query, self.top_k).await,
            RetrievalStrategy::VectorCypher => {
                session
                    .graph_expansion(query, self.top_k, &self.limits, CandidateSelection::Vector)
                    .await
            }
            RetrievalStrategy::Hybrid => {
                session
                    .graph_expansion(query, self.top_k, &self.limits, CandidateSelection::Hybrid)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, FakeResponse};

    fn adapter(backend: &Arc<FakeBackend>) -> RetrievalAdapter {
        RetrievalAdapter::new(backend.clone(), 5, ExpansionLimits::default())
    }

    #[tokio::test]
    async fn test_strategy_dispatch() {
        let backend = Arc::new(FakeBackend::new());
        let adapter = adapter(&backend);

        adapter.retrieve(RetrievalStrategy::Vector, "q1").await;
        adapter.retrieve(RetrievalStrategy::VectorCypher, "q2").await;
        adapter.retrieve(RetrievalStrategy::Hybrid, "q3").await;

        assert_eq!(
            backend.calls(),
            vec![
                ("similarity".to_string(), "q1".to_string()),
                ("expansion_vector".to_string(), "q2".to_string()),
                ("expansion_hybrid".to_string(), "q3".to_string()),
            ]
        );
        assert_eq!(backend.connects(), 3);
        assert_eq!(backend.closes(), 3);
    }

    #[tokio::test]
    async fn test_backend_error_yields_empty_and_closes() {
        let backend = Arc::new(FakeBackend::new());
        backend.push(FakeResponse::Fail("index offline".into()));

        let items = adapter(&backend).retrieve(RetrievalStrategy::Hybrid, "q").await;
        assert!(items.is_empty());
        assert_eq!(backend.closes(), 1);
    }

    #[tokio::test]
    async fn test_backend_panic_yields_empty_and_closes() {
        let backend = Arc::new(FakeBackend::new());
        backend.push(FakeResponse::Panic);

        let outcome = adapter(&backend)
            .retrieve_outcome(RetrievalStrategy::Vector, "q")
            .await;
        assert!(outcome.is_empty());
        assert_eq!(backend.closes(), 1);
    }

    #[tokio::test]
    async fn test_connect_failure_yields_empty() {
        let backend = Arc::new(FakeBackend::new().failing_connect());
        let items = adapter(&backend).retrieve(RetrievalStrategy::Vector, "q").await;
        assert!(items.is_empty());
        assert_eq!(backend.closes(), 0);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_items_are_passed_through() {
        let backend = Arc::new(FakeBackend::new());
        backend.push(FakeResponse::Items(vec![RetrievalItem::Vector("{}".into())]));

        let items = adapter(&backend).retrieve(RetrievalStrategy::Vector, "q").await;
        assert_eq!(items, vec![RetrievalItem::Vector("{}".into())]);
    }
}
