//! Conversation persistence

mod memory;
mod sqlite;
mod store;

use std::sync::Arc;

use crate::config::{ConversationBackend, ConversationConfig};
use crate::error::Result;

pub use memory::InMemoryConversationStore;
pub use sqlite::SqliteConversationStore;
pub use store::ConversationStore;

/// Open the configured conversation store
pub fn open_store(config: &ConversationConfig) -> Result<Arc<dyn ConversationStore>> {
    match config.backend {
        ConversationBackend::Memory => Ok(Arc::new(InMemoryConversationStore::new())),
        ConversationBackend::Sqlite => {
            tracing::info!("Opening conversation database at {:?}", config.storage_path);
            Ok(Arc::new(SqliteConversationStore::new(&config.storage_path)?))
        }
    }
}
