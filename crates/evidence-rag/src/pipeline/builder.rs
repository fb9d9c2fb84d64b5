//! Startup wiring of the query pipeline

use std::sync::Arc;

use super::orchestrator::{PipelineParts, QueryOrchestrator};
use crate::citation::{SourceExtractor, UrlTable};
use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::generation::AnswerGenerator;
use crate::providers::{
    EmbeddingProvider, ExpansionLimits, KnowledgeBackend, LlmProvider, Neo4jBackend, OllamaProvider,
};
use crate::retrieval::{RetrievalAdapter, StrategySelector};

/// Builds a `QueryOrchestrator` from configuration
///
/// Backends may be injected; missing ones are created from the config. Any
/// failure during construction or the startup health checks yields a degraded
/// orchestrator instead of an error.
pub struct PipelineBuilder {
    config: RagConfig,
    selector: Option<Arc<StrategySelector>>,
    backend: Option<Arc<dyn KnowledgeBackend>>,
    llm: Option<Arc<dyn LlmProvider>>,
    check_health: bool,
}

impl PipelineBuilder {
    pub fn new(config: RagConfig) -> Self {
        Self {
            config,
            selector: None,
            backend: None,
            llm: None,
            check_health: true,
        }
    }

    /// Share an existing strategy selector
    pub fn selector(mut self, selector: Arc<StrategySelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn KnowledgeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn skip_health_checks(mut self) -> Self {
        self.check_health = false;
        self
    }

    /// Build the orchestrator, falling back to degraded mode on failure
    pub async fn build(self) -> QueryOrchestrator {
        let selector = self.selector.clone().unwrap_or_else(|| {
            Arc::new(StrategySelector::new(self.config.retrieval.default_strategy))
        });

        match self.try_build().await {
            Ok(parts) => {
                tracing::info!(
                    backend = parts.adapter.backend().name(),
                    llm = parts.generator.llm().name(),
                    model = parts.generator.llm().model(),
                    "Query pipeline ready"
                );
                QueryOrchestrator::new(selector, parts)
            }
            Err(e) => {
                tracing::error!("Query pipeline unavailable, running degraded: {}", e);
                QueryOrchestrator::degraded(selector, e.to_string())
            }
        }
    }

    async fn try_build(&self) -> Result<PipelineParts> {
        self.config.validate()?;

        let (backend, llm) = self.providers()?;

        if self.check_health {
            ensure_healthy("knowledge backend", backend.name(), backend.health_check().await)?;
            ensure_healthy("generation backend", llm.name(), llm.health_check().await)?;
        }

        let urls = UrlTable::new(
            &self.config.sources.urls,
            self.config.sources.search_url_base.clone(),
        );
        tracing::debug!(entries = urls.len(), "Loaded source URL table");

        Ok(PipelineParts {
            adapter: RetrievalAdapter::new(
                backend,
                self.config.graph.top_k,
                ExpansionLimits::from(&self.config.retrieval),
            ),
            generator: AnswerGenerator::new(llm, self.config.generation.include_history),
            extractor: SourceExtractor::new(urls),
        })
    }

    fn providers(&self) -> Result<(Arc<dyn KnowledgeBackend>, Arc<dyn LlmProvider>)> {
        if let (Some(backend), Some(llm)) = (&self.backend, &self.llm) {
            return Ok((Arc::clone(backend), Arc::clone(llm)));
        }

        let (embedder, ollama_llm) =
            OllamaProvider::new(&self.config.llm, self.config.embeddings.dimensions)?.split();
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);

        let backend: Arc<dyn KnowledgeBackend> = match &self.backend {
            Some(backend) => Arc::clone(backend),
            None => Arc::new(Neo4jBackend::new(&self.config.graph, embedder)?),
        };
        let llm: Arc<dyn LlmProvider> = match &self.llm {
            Some(llm) => Arc::clone(llm),
            None => Arc::new(ollama_llm),
        };
        Ok((backend, llm))
    }
}

fn ensure_healthy(role: &str, name: &str, check: Result<bool>) -> Result<()> {
    match check {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::config(format!("{} '{}' is not healthy", role, name))),
        Err(e) => Err(Error::config(format!("{} '{}' health check failed: {}", role, name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, FakeLlm};
    use crate::types::response::DEGRADED_ANSWER;
    use crate::types::{ConversationContext, RetrievalStrategy};

    #[tokio::test]
    async fn test_builds_ready_pipeline_from_injected_backends() {
        let orchestrator = PipelineBuilder::new(RagConfig::default())
            .backend(Arc::new(FakeBackend::new()))
            .llm(Arc::new(FakeLlm::answering("ok")))
            .build()
            .await;
        assert!(!orchestrator.is_degraded());
        assert_eq!(orchestrator.selector().resolve(None), RetrievalStrategy::Hybrid);
    }

    #[tokio::test]
    async fn test_invalid_config_degrades() {
        let mut config = RagConfig::default();
        config.graph.uri = String::new();

        let orchestrator = PipelineBuilder::new(config)
            .backend(Arc::new(FakeBackend::new()))
            .llm(Arc::new(FakeLlm::answering("ok")))
            .build()
            .await;

        assert!(orchestrator.is_degraded());
        assert!(orchestrator.degraded_reason().unwrap().contains("graph.uri"));
        let result = orchestrator
            .handle("anything", &ConversationContext::empty(1), None)
            .await;
        assert_eq!(result.answer, DEGRADED_ANSWER);
    }

    #[tokio::test]
    async fn test_unhealthy_backend_degrades() {
        let orchestrator = PipelineBuilder::new(RagConfig::default())
            .backend(Arc::new(FakeBackend::new().unhealthy()))
            .llm(Arc::new(FakeLlm::answering("ok")))
            .build()
            .await;
        assert!(orchestrator.is_degraded());
        assert!(orchestrator
            .degraded_reason()
            .unwrap()
            .contains("knowledge backend"));
    }

    #[tokio::test]
    async fn test_skip_health_checks() {
        let orchestrator = PipelineBuilder::new(RagConfig::default())
            .backend(Arc::new(FakeBackend::new().unhealthy()))
            .llm(Arc::new(FakeLlm::answering("ok")))
            .skip_health_checks()
            .build()
            .await;
        assert!(!orchestrator.is_degraded());
    }

    #[tokio::test]
    async fn test_configured_default_strategy_is_shared() {
        let mut config = RagConfig::default();
        config.retrieval.default_strategy = Some(RetrievalStrategy::Vector);
        let selector = Arc::new(StrategySelector::new(config.retrieval.default_strategy));

        let orchestrator = PipelineBuilder::new(config)
            .selector(Arc::clone(&selector))
            .backend(Arc::new(FakeBackend::new()))
            .llm(Arc::new(FakeLlm::answering("ok")))
            .build()
            .await;

        selector.set_default(Some(RetrievalStrategy::VectorCypher));
        assert_eq!(orchestrator.selector().resolve(None), RetrievalStrategy::VectorCypher);
    }
}
