//! In-memory conversation store

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::store::ConversationStore;
use crate::error::{Error, Result};
use crate::types::{Conversation, Message, Role, Source};

/// Conversation store backed by concurrent maps
#[derive(Default)]
pub struct InMemoryConversationStore {
    conversations: DashMap<i64, Conversation>,
    messages: DashMap<i64, Vec<Message>>,
    next_conversation_id: AtomicI64,
    next_message_id: AtomicI64,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn create_conversation(&self, owner_id: &str, title: Option<&str>) -> Result<Conversation> {
        let now = Utc::now();
        let conversation = Conversation {
            id: self.next_conversation_id.fetch_add(1, Ordering::SeqCst) + 1,
            owner_id: owner_id.to_string(),
            title: title.map(str::to_string),
            created_at: now,
            updated_at: now,
        };

        self.messages.insert(conversation.id, Vec::new());
        self.conversations.insert(conversation.id, conversation.clone());
        Ok(conversation)
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>> {
        Ok(self.conversations.get(&id).map(|c| c.clone()))
    }

    async fn list_conversations(
        &self,
        owner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        let mut owned: Vec<Conversation> = self
            .conversations
            .iter()
            .filter(|entry| entry.owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        Ok(owned.into_iter().skip(skip).take(limit).collect())
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .messages
            .get(&conversation_id)
            .map(|m| m.clone())
            .unwrap_or_default())
    }

    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str,
        sources: Option<&[Source]>,
    ) -> Result<Message> {
        let now = Utc::now();

        let mut conversation = self
            .conversations
            .get_mut(&conversation_id)
            .ok_or(Error::ConversationNotFound(conversation_id))?;
        conversation.updated_at = now;
        drop(conversation);

        let message = Message {
            id: self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1,
            conversation_id,
            role,
            content: content.to_string(),
            sources: sources.map(<[Source]>::to_vec),
            created_at: now,
        };

        self.messages
            .entry(conversation_id)
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
