//! Conversation store trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Conversation, Message, Role, Source};

/// Persistence of conversations and their messages
///
/// Implementations:
/// - `InMemoryConversationStore`: process-local maps (tests, ephemeral deployments)
/// - `SqliteConversationStore`: durable SQLite storage
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Create a conversation owned by `owner_id`
    async fn create_conversation(&self, owner_id: &str, title: Option<&str>) -> Result<Conversation>;

    /// Fetch a conversation by id
    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>>;

    /// Conversations of an owner, most recently updated first
    async fn list_conversations(
        &self,
        owner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Conversation>>;

    /// Messages of a conversation in creation order
    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>>;

    /// Append a message and bump the conversation's `updated_at`
    ///
    /// Fails with `ConversationNotFound` when the conversation does not exist.
    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str,
        sources: Option<&[Source]>,
    ) -> Result<Message>;

    /// Get store name for logging
    fn name(&self) -> &str;
}
