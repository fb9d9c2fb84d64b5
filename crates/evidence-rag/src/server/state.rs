//! Application state for the RAG server

use std::sync::Arc;

use crate::citation::UrlTable;
use crate::config::RagConfig;
use crate::conversation::{open_store, ConversationStore};
use crate::error::Result;
use crate::pipeline::{PipelineBuilder, QueryOrchestrator, QueryService};
use crate::retrieval::StrategySelector;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Query service (orchestrator + conversation store)
    service: QueryService,
    /// Process-wide default retrieval strategy
    selector: Arc<StrategySelector>,
    /// Source catalogue for the listing endpoint
    urls: UrlTable,
}

impl AppState {
    /// Create new application state
    ///
    /// Only a conversation store failure is fatal; backend problems leave the
    /// pipeline degraded and are reported by `/ready`.
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing RAG application state...");

        let store = open_store(&config.conversations)?;
        tracing::info!("Conversation store initialized ({})", store.name());

        let selector = Arc::new(StrategySelector::new(config.retrieval.default_strategy));
        let orchestrator = PipelineBuilder::new(config.clone())
            .selector(Arc::clone(&selector))
            .build()
            .await;

        Ok(Self::from_parts(config, Arc::new(orchestrator), store))
    }

    /// Assemble state from already built components
    pub fn from_parts(
        config: RagConfig,
        orchestrator: Arc<QueryOrchestrator>,
        store: Arc<dyn ConversationStore>,
    ) -> Self {
        let selector = Arc::clone(orchestrator.selector());
        let urls = UrlTable::new(&config.sources.urls, config.sources.search_url_base.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: QueryService::new(orchestrator, store),
                selector,
                urls,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn service(&self) -> &QueryService {
        &self.inner.service
    }

    pub fn selector(&self) -> &StrategySelector {
        &self.inner.selector
    }

    pub fn url_table(&self) -> &UrlTable {
        &self.inner.urls
    }

    /// Check if the query pipeline is fully initialized
    pub fn is_ready(&self) -> bool {
        !self.inner.service.orchestrator().is_degraded()
    }

    /// Reason the pipeline is degraded, if it is
    pub fn degraded_reason(&self) -> Option<&str> {
        self.inner.service.orchestrator().degraded_reason()
    }
}
