//! Conversation-aware query service

use std::sync::Arc;

use super::orchestrator::QueryOrchestrator;
use crate::conversation::ConversationStore;
use crate::error::{Error, Result};
use crate::format::ResponseFormatter;
use crate::types::{
    Conversation, ConversationContext, FormattedResponse, Message, OutputMode, Role,
};

/// Characters of the first query used as a new conversation's title
const TITLE_CHARS: usize = 50;

/// Ties the orchestrator to conversation persistence
pub struct QueryService {
    orchestrator: Arc<QueryOrchestrator>,
    store: Arc<dyn ConversationStore>,
}

impl QueryService {
    pub fn new(orchestrator: Arc<QueryOrchestrator>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub fn orchestrator(&self) -> &Arc<QueryOrchestrator> {
        &self.orchestrator
    }

    pub fn store(&self) -> &Arc<dyn ConversationStore> {
        &self.store
    }

    /// Answer a query on behalf of `owner_id` and record both turns
    pub async fn query(
        &self,
        owner_id: &str,
        text: &str,
        conversation_id: Option<i64>,
        strategy: Option<&str>,
        mode: OutputMode,
    ) -> Result<FormattedResponse> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("query must not be empty".to_string()));
        }

        let conversation = match conversation_id {
            Some(id) => self.owned_conversation(owner_id, id).await?,
            None => {
                self.store
                    .create_conversation(owner_id, Some(&conversation_title(text)))
                    .await?
            }
        };

        let messages = self.store.list_messages(conversation.id).await?;
        let history = ConversationContext::from_messages(conversation.id, &messages);
        self.store
            .append_message(conversation.id, Role::User, text, None)
            .await?;

        let result = self.orchestrator.handle(text, &history, strategy).await;

        self.store
            .append_message(
                conversation.id,
                Role::Assistant,
                &result.answer,
                Some(&result.sources),
            )
            .await?;

        Ok(ResponseFormatter::format(mode, &result, text))
    }

    /// Conversations of `owner_id`, most recent first
    pub async fn conversations(
        &self,
        owner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        self.store.list_conversations(owner_id, skip, limit).await
    }

    /// Start an empty conversation
    pub async fn create_conversation(
        &self,
        owner_id: &str,
        title: Option<&str>,
    ) -> Result<Conversation> {
        self.store.create_conversation(owner_id, title).await
    }

    pub async fn conversation(&self, owner_id: &str, id: i64) -> Result<Conversation> {
        self.owned_conversation(owner_id, id).await
    }

    pub async fn messages(&self, owner_id: &str, id: i64) -> Result<Vec<Message>> {
        let conversation = self.owned_conversation(owner_id, id).await?;
        self.store.list_messages(conversation.id).await
    }

    async fn owned_conversation(&self, owner_id: &str, id: i64) -> Result<Conversation> {
        let conversation = self
            .store
            .get_conversation(id)
            .await?
            .ok_or(Error::ConversationNotFound(id))?;

        if conversation.owner_id != owner_id {
            tracing::warn!(conversation_id = id, "Conversation accessed by another owner");
            return Err(Error::Forbidden(id));
        }
        Ok(conversation)
    }
}

fn conversation_title(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() > TITLE_CHARS {
        let head: String = text.chars().take(TITLE_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::citation::{SourceExtractor, UrlTable};
    use crate::conversation::InMemoryConversationStore;
    use crate::generation::AnswerGenerator;
    use crate::pipeline::PipelineParts;
    use crate::providers::ExpansionLimits;
    use crate::retrieval::{RetrievalAdapter, StrategySelector};
    use crate::testing::{FakeBackend, FakeLlm, FakeResponse};
    use crate::types::{RetrievalItem, Turn};

    struct Fixture {
        backend: Arc<FakeBackend>,
        llm: Arc<FakeLlm>,
        store: Arc<InMemoryConversationStore>,
        service: QueryService,
    }

    fn fixture() -> Fixture {
        let backend = Arc::new(FakeBackend::new());
        let llm = Arc::new(FakeLlm::answering("X."));
        let store = Arc::new(InMemoryConversationStore::new());
        let orchestrator = QueryOrchestrator::new(
            Arc::new(StrategySelector::default()),
            PipelineParts {
                adapter: RetrievalAdapter::new(backend.clone(), 5, ExpansionLimits::default()),
                generator: AnswerGenerator::new(llm.clone(), true),
                extractor: SourceExtractor::new(UrlTable::builtin("https://www.google.com/search?q=")),
            },
        );
        let service = QueryService::new(Arc::new(orchestrator), store.clone());
        Fixture {
            backend,
            llm,
            store,
            service,
        }
    }

    fn hit(path: &str) -> FakeResponse {
        FakeResponse::Items(vec![RetrievalItem::Vector(
            serde_json::json!({ "text": "the treatment is X.", "source2": path }).to_string(),
        )])
    }

    #[tokio::test]
    async fn test_query_creates_conversation_and_records_turns() {
        let f = fixture();
        f.backend.push(hit("A_B.pdf"));

        let response = f
            .service
            .query("alice", "treatment options", None, Some("vector"), OutputMode::Raw)
            .await
            .unwrap();

        let raw = match response {
            FormattedResponse::Raw(raw) => raw,
            other => panic!("unexpected contract: {:?}", other),
        };
        assert_eq!(raw.answer, "X.");
        assert_eq!(raw.sources[0].source_name, "A B");

        let conversation = f.store.get_conversation(raw.conversation_id).await.unwrap().unwrap();
        assert_eq!(conversation.owner_id, "alice");
        assert_eq!(conversation.title.as_deref(), Some("treatment options"));

        let messages = f.store.list_messages(raw.conversation_id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].sources.is_none());
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].sources.as_ref().unwrap()[0].path, "A_B.pdf");
    }

    #[tokio::test]
    async fn test_history_excludes_current_turn() {
        let f = fixture();
        f.backend.push(hit("a.pdf"));
        f.backend.push(hit("b.pdf"));

        let first = f
            .service
            .query("alice", "first question", None, Some("vector"), OutputMode::Raw)
            .await
            .unwrap();
        let id = match first {
            FormattedResponse::Raw(raw) => raw.conversation_id,
            other => panic!("unexpected contract: {:?}", other),
        };

        f.service
            .query("alice", "second question", Some(id), Some("vector"), OutputMode::Raw)
            .await
            .unwrap();

        let requests = f.llm.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].history.is_empty());
        assert_eq!(
            requests[1].history,
            vec![Turn::user("first question"), Turn::assistant("X.")]
        );
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let f = fixture();
        let err = f
            .service
            .query("alice", "   ", None, None, OutputMode::Raw)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(f.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_access_checks() {
        let f = fixture();
        let owned = f.store.create_conversation("alice", None).await.unwrap();

        let err = f
            .service
            .query("bob", "question", Some(owned.id), None, OutputMode::Raw)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(id) if id == owned.id));

        let err = f.service.messages("alice", owned.id + 10).await.unwrap_err();
        assert!(matches!(err, Error::ConversationNotFound(_)));

        assert!(f.service.conversation("alice", owned.id).await.is_ok());
        assert!(f.service.conversations("bob", 0, 10).await.unwrap().is_empty());
        assert!(f.store.list_messages(owned.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_evidence_is_still_recorded() {
        let f = fixture();
        let response = f
            .service
            .query("alice", "unknown topic", None, Some("vector"), OutputMode::StandardRag)
            .await
            .unwrap();
        match response {
            FormattedResponse::StandardRag(rag) => assert!(rag.sources.is_empty()),
            other => panic!("unexpected contract: {:?}", other),
        }

        let conversations = f.service.conversations("alice", 0, 10).await.unwrap();
        let messages = f.store.list_messages(conversations[0].id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sources, Some(vec![]));
    }

    #[test]
    fn test_conversation_title() {
        assert_eq!(conversation_title("short"), "short");
        let long = "a".repeat(60);
        assert_eq!(conversation_title(&long), format!("{}...", "a".repeat(50)));
        assert_eq!(conversation_title(&"é".repeat(50)), "é".repeat(50));
    }
}
