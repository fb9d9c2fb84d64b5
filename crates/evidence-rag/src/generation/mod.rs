//! Answer generation with the LLM

pub mod generator;
pub mod ollama;
pub mod prompt;

pub use generator::{AnswerGenerator, GENERATION_TEMPERATURE};
pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;
