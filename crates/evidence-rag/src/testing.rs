//! In-memory fakes for the collaborator traits

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{
    CandidateSelection, ExpansionLimits, GenerationRequest, KnowledgeBackend, KnowledgeSession,
    LlmProvider,
};
use crate::types::RetrievalItem;

/// Scripted answer of one retrieval call
pub enum FakeResponse {
    Items(Vec<RetrievalItem>),
    Fail(String),
    Panic,
}

#[derive(Default)]
struct BackendState {
    responses: Mutex<VecDeque<FakeResponse>>,
    calls: Mutex<Vec<(String, String)>>,
    connects: AtomicUsize,
    closes: AtomicUsize,
}

/// Knowledge backend answering from a script; unscripted calls return no items
#[derive(Default)]
pub struct FakeBackend {
    state: Arc<BackendState>,
    fail_connect: bool,
    unhealthy: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.unhealthy = true;
        self
    }

    pub fn push(&self, response: FakeResponse) {
        self.state.responses.lock().push_back(response);
    }

    /// `(operation, query)` of every search issued, in order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.state.calls.lock().clone()
    }

    pub fn connects(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBackend for FakeBackend {
    async fn connect(&self) -> Result<Box<dyn KnowledgeSession>> {
        if self.fail_connect {
            return Err(Error::graph("connection refused"));
        }
        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession {
            state: Arc::clone(&self.state),
        }))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.unhealthy)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakeSession {
    state: Arc<BackendState>,
}

impl FakeSession {
    fn answer(&self, operation: &str, query: &str) -> Result<Vec<RetrievalItem>> {
        self.state
            .calls
            .lock()
            .push((operation.to_string(), query.to_string()));

        let next = self.state.responses.lock().pop_front();
        match next {
            Some(FakeResponse::Items(items)) => Ok(items),
            Some(FakeResponse::Fail(message)) => Err(Error::graph(message)),
            Some(FakeResponse::Panic) => panic!("backend exploded"),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl KnowledgeSession for FakeSession {
    async fn similarity_search(&mut self, query: &str, _top_k: usize) -> Result<Vec<RetrievalItem>> {
        self.answer("similarity", query)
    }

    async fn graph_expansion(
        &mut self,
        query: &str,
        _top_k: usize,
        _limits: &ExpansionLimits,
        candidates: CandidateSelection,
    ) -> Result<Vec<RetrievalItem>> {
        let operation = match candidates {
            CandidateSelection::Vector => "expansion_vector",
            CandidateSelection::Hybrid => "expansion_hybrid",
        };
        self.answer(operation, query)
    }

    async fn close(&mut self) -> Result<()> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// LLM echoing a fixed answer and recording every request
#[derive(Default)]
pub struct FakeLlm {
    answer: String,
    failure: Option<String>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    async fn complete(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().push(request.clone());
        match &self.failure {
            Some(message) => Err(Error::llm(message.clone())),
            None => Ok(self.answer.clone()),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "fake"
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}
