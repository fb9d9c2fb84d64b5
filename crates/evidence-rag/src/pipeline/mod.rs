//! Query pipeline
//!
//! - `QueryOrchestrator`: one query cycle from sanitization to ranked sources
//! - `PipelineBuilder`: startup wiring with degraded-mode fallback
//! - `QueryService`: conversation bookkeeping around the orchestrator

mod builder;
mod orchestrator;
mod service;

pub use builder::PipelineBuilder;
pub use orchestrator::{PipelineParts, QueryOrchestrator};
pub use service::QueryService;
