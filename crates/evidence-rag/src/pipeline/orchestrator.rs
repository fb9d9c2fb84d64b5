//! Query orchestration with degraded-mode fallback

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use crate::citation::SourceExtractor;
use crate::format::ResponseFormatter;
use crate::generation::AnswerGenerator;
use crate::ranking;
use crate::retrieval::{sanitize_query, simplify_query, RetrievalAdapter, StrategySelector};
use crate::types::{
    AnswerResult, ConversationContext, FormattedResponse, OutputMode, RetrievalOutcome,
    RetrievalStrategy,
};

/// Collaborators of a fully initialized pipeline
pub struct PipelineParts {
    pub adapter: RetrievalAdapter,
    pub generator: AnswerGenerator,
    pub extractor: SourceExtractor,
}

enum PipelineState {
    Ready(Box<PipelineParts>),
    Degraded { reason: String },
}

/// Top-level coordinator of one query cycle
///
/// `handle` never fails: every internal failure becomes a well-formed
/// `AnswerResult` with an apology answer and no sources.
pub struct QueryOrchestrator {
    selector: Arc<StrategySelector>,
    state: PipelineState,
}

impl QueryOrchestrator {
    pub fn new(selector: Arc<StrategySelector>, parts: PipelineParts) -> Self {
        Self {
            selector,
            state: PipelineState::Ready(Box::new(parts)),
        }
    }

    /// Orchestrator that answers every query with the fixed degraded apology
    pub fn degraded(selector: Arc<StrategySelector>, reason: impl Into<String>) -> Self {
        Self {
            selector,
            state: PipelineState::Degraded {
                reason: reason.into(),
            },
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, PipelineState::Degraded { .. })
    }

    /// Why the pipeline is degraded, if it is
    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.state {
            PipelineState::Degraded { reason } => Some(reason),
            PipelineState::Ready(_) => None,
        }
    }

    pub fn selector(&self) -> &Arc<StrategySelector> {
        &self.selector
    }

    /// Answer `query` in the given conversation
    pub async fn handle(
        &self,
        query: &str,
        history: &ConversationContext,
        strategy: Option<&str>,
    ) -> AnswerResult {
        let conversation_id = history.conversation_id();

        let parts = match &self.state {
            PipelineState::Ready(parts) => parts,
            PipelineState::Degraded { reason } => {
                tracing::warn!(reason = %reason, "Pipeline degraded, returning fixed answer");
                return AnswerResult::degraded(conversation_id);
            }
        };

        let strategy = self.selector.resolve(strategy);
        let start = Instant::now();

        let result = AssertUnwindSafe(parts.run(query, history, strategy))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!(%strategy, "Query pipeline panicked");
                AnswerResult::no_evidence(conversation_id)
            });

        tracing::info!(
            %strategy,
            conversation_id,
            sources = result.sources.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Query handled"
        );
        result
    }

    /// Answer `query` and project the result into `mode`
    pub async fn handle_formatted(
        &self,
        query: &str,
        history: &ConversationContext,
        strategy: Option<&str>,
        mode: OutputMode,
    ) -> FormattedResponse {
        let result = self.handle(query, history, strategy).await;
        ResponseFormatter::format(mode, &result, query)
    }
}

impl PipelineParts {
    async fn run(
        &self,
        query: &str,
        history: &ConversationContext,
        strategy: RetrievalStrategy,
    ) -> AnswerResult {
        let conversation_id = history.conversation_id();

        let items = match self.retrieve(strategy, query).await {
            RetrievalOutcome::Hit(items) => items,
            RetrievalOutcome::Empty => {
                tracing::info!(%strategy, "No evidence retrieved");
                return AnswerResult::no_evidence(conversation_id);
            }
        };

        let answer = match self.generator.generate(query, history, &items).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!("Generation failed: {}", e);
                return AnswerResult::generation_failure(conversation_id, &e.to_string());
            }
        };

        let sources = ranking::finalize(self.extractor.extract(&items));
        AnswerResult::new(answer, sources, conversation_id)
    }

    /// Sanitized retrieval, then at most one retry with the simplified query
    async fn retrieve(&self, strategy: RetrievalStrategy, query: &str) -> RetrievalOutcome {
        let sanitized = sanitize_query(query);
        tracing::debug!(original = query, sanitized = %sanitized, "Sanitized query");

        match self.adapter.retrieve_outcome(strategy, &sanitized).await {
            RetrievalOutcome::Empty => match simplify_query(&sanitized) {
                Some(simplified) => {
                    tracing::info!(simplified = %simplified, "Retrying with simplified query");
                    self.adapter.retrieve_outcome(strategy, &simplified).await
                }
                None => RetrievalOutcome::Empty,
            },
            hit => hit,
        }
    }
}
