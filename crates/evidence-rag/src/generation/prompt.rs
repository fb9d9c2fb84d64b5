//! Prompt template for grounded RAG generation

use crate::types::RetrievalItem;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved payloads into the context block
    pub fn build_context(items: &[RetrievalItem]) -> String {
        items
            .iter()
            .filter(|item| item.has_content())
            .map(|item| format!("{}\n\n", item.content()))
            .collect()
    }

    /// Fill the fixed template with the original query and the context block
    pub fn build_rag_prompt(query: &str, context: &str) -> String {
        format!(
            "Answer the Question using the following Context. Only respond with information \
mentioned in the Context. Do not inject any speculative information not mentioned.

# Question:
{query}

# Context:
{context}

# Answer:
",
            query = query,
            context = context,
        )
    }
}
