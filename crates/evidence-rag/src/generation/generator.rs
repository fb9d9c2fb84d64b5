//! Grounded answer generation

use std::sync::Arc;

use super::prompt::PromptBuilder;
use crate::error::Result;
use crate::providers::{GenerationRequest, LlmProvider};
use crate::types::{ConversationContext, RetrievalItem};

/// Answers are generated deterministically
pub const GENERATION_TEMPERATURE: f32 = 0.0;

/// Combines conversation history and retrieved context into one completion call
pub struct AnswerGenerator {
    llm: Arc<dyn LlmProvider>,
    include_history: bool,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, include_history: bool) -> Self {
        Self {
            llm,
            include_history,
        }
    }

    pub fn llm(&self) -> &Arc<dyn LlmProvider> {
        &self.llm
    }

    /// Request for the original query over the retrieved items
    pub fn build_request(
        &self,
        query: &str,
        history: &ConversationContext,
        items: &[RetrievalItem],
    ) -> GenerationRequest {
        let context = PromptBuilder::build_context(items);
        GenerationRequest {
            history: if self.include_history {
                history.turns().to_vec()
            } else {
                Vec::new()
            },
            prompt: PromptBuilder::build_rag_prompt(query, &context),
            temperature: GENERATION_TEMPERATURE,
        }
    }

    /// Run exactly one completion
    pub async fn generate(
        &self,
        query: &str,
        history: &ConversationContext,
        items: &[RetrievalItem],
    ) -> Result<String> {
        let request = self.build_request(query, history, items);
        tracing::debug!(
            llm = self.llm.name(),
            model = self.llm.model(),
            history_turns = request.history.len(),
            prompt_chars = request.prompt.len(),
            "Requesting completion"
        );
        self.llm.complete(&request).await
    }
}
