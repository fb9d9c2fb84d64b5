//! SQLite conversation store
//!
//! Durable storage for conversations and messages. Sources attached to an
//! assistant message are stored as JSON.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::{params, types::Type, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use super::store::ConversationStore;
use crate::error::{Error, Result};
use crate::types::{Conversation, Message, Role, Source};

/// SQLite-based conversation store
pub struct SqliteConversationStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteConversationStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::storage(format!("Failed to open database: {}", e)))?;
        Self::from_connection(conn)
    }

    /// Create an in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::storage(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA foreign_keys=ON;
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS conversations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id TEXT NOT NULL,
                title TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_conversations_owner
                ON conversations(owner_id, updated_at);

            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                conversation_id INTEGER NOT NULL
                    REFERENCES conversations(id) ON DELETE CASCADE,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                sources TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_messages_conversation
                ON messages(conversation_id, id);
        "#,
        )
        .map_err(|e| Error::storage(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Run a blocking operation on the connection off the async executor
    async fn with_conn<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            operation(&conn)
        })
        .await
        .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl ConversationStore for SqliteConversationStore {
    async fn create_conversation(&self, owner_id: &str, title: Option<&str>) -> Result<Conversation> {
        let owner_id = owner_id.to_string();
        let title = title.map(str::to_string);

        self.with_conn(move |conn| {
            let now = Utc::now();
            conn.execute(
                "INSERT INTO conversations (owner_id, title, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?3)",
                params![owner_id, title, timestamp(&now)],
            )
            .map_err(|e| Error::storage(format!("Failed to create conversation: {}", e)))?;

            Ok(Conversation {
                id: conn.last_insert_rowid(),
                owner_id,
                title,
                created_at: now,
                updated_at: now,
            })
        })
        .await
    }

    async fn get_conversation(&self, id: i64) -> Result<Option<Conversation>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, owner_id, title, created_at, updated_at
                 FROM conversations WHERE id = ?1",
                params![id],
                row_to_conversation,
            )
            .optional()
            .map_err(|e| Error::storage(format!("Failed to get conversation: {}", e)))
        })
        .await
    }

    async fn list_conversations(
        &self,
        owner_id: &str,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        let owner_id = owner_id.to_string();

        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, owner_id, title, created_at, updated_at
                     FROM conversations WHERE owner_id = ?1
                     ORDER BY updated_at DESC, id DESC
                     LIMIT ?2 OFFSET ?3",
                )
                .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

            let conversations = stmt
                .query_map(
                    params![owner_id, limit as i64, skip as i64],
                    row_to_conversation,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::storage(format!("Failed to list conversations: {}", e)))?;

            Ok(conversations)
        })
        .await
    }

    async fn list_messages(&self, conversation_id: i64) -> Result<Vec<Message>> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, conversation_id, role, content, sources, created_at
                     FROM messages WHERE conversation_id = ?1
                     ORDER BY id ASC",
                )
                .map_err(|e| Error::storage(format!("Failed to prepare query: {}", e)))?;

            let messages = stmt
                .query_map(params![conversation_id], row_to_message)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::storage(format!("Failed to list messages: {}", e)))?;

            Ok(messages)
        })
        .await
    }

    async fn append_message(
        &self,
        conversation_id: i64,
        role: Role,
        content: &str,
        sources: Option<&[Source]>,
    ) -> Result<Message> {
        let content = content.to_string();
        let sources = sources.map(<[Source]>::to_vec);
        let sources_json = sources.as_ref().map(serde_json::to_string).transpose()?;

        self.with_conn(move |conn| {
            let now = Utc::now();
            let updated = conn
                .execute(
                    "UPDATE conversations SET updated_at = ?2 WHERE id = ?1",
                    params![conversation_id, timestamp(&now)],
                )
                .map_err(|e| Error::storage(format!("Failed to update conversation: {}", e)))?;
            if updated == 0 {
                return Err(Error::ConversationNotFound(conversation_id));
            }

            conn.execute(
                "INSERT INTO messages (conversation_id, role, content, sources, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    conversation_id,
                    role.as_str(),
                    content,
                    sources_json,
                    timestamp(&now)
                ],
            )
            .map_err(|e| Error::storage(format!("Failed to append message: {}", e)))?;

            Ok(Message {
                id: conn.last_insert_rowid(),
                conversation_id,
                role,
                content,
                sources,
                created_at: now,
            })
        })
        .await
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering
fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn row_to_conversation(row: &rusqlite::Row) -> rusqlite::Result<Conversation> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Conversation {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        created_at: parse_timestamp(3, &created_at)?,
        updated_at: parse_timestamp(4, &updated_at)?,
    })
}

fn row_to_message(row: &rusqlite::Row) -> rusqlite::Result<Message> {
    let role: String = row.get(2)?;
    let sources_json: Option<String> = row.get(4)?;
    let created_at: String = row.get(5)?;

    let role = role
        .parse::<Role>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
    let sources = sources_json
        .map(|json| serde_json::from_str::<Vec<Source>>(&json))
        .transpose()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Message {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role,
        content: row.get(3)?,
        sources,
        created_at: parse_timestamp(5, &created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(path: &str) -> Source {
        Source {
            path: path.to_string(),
            display_name: path.trim_end_matches(".pdf").to_string(),
            external_url: format!("https://example.org/{}", path),
            content: Some("passage".to_string()),
        }
    }

    #[tokio::test]
    async fn test_conversation_round_trip() {
        let store = SqliteConversationStore::in_memory().unwrap();
        let created = store.create_conversation("alice", Some("EoE diets")).await.unwrap();

        let fetched = store.get_conversation(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.owner_id, "alice");
        assert_eq!(fetched.title.as_deref(), Some("EoE diets"));
        assert!(store.get_conversation(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_messages_store_sources() {
        let store = SqliteConversationStore::in_memory().unwrap();
        let conversation = store.create_conversation("alice", None).await.unwrap();

        store
            .append_message(conversation.id, Role::User, "question", None)
            .await
            .unwrap();
        let sources = vec![source("a.pdf"), source("b.pdf")];
        store
            .append_message(conversation.id, Role::Assistant, "answer", Some(&sources))
            .await
            .unwrap();

        let messages = store.list_messages(conversation.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].sources.is_none());
        assert_eq!(messages[1].sources.as_ref().unwrap(), &sources);
    }

    #[tokio::test]
    async fn test_append_to_missing_conversation() {
        let store = SqliteConversationStore::in_memory().unwrap();
        let err = store
            .append_message(9, Role::User, "hello", None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConversationNotFound(9)));
    }

    #[tokio::test]
    async fn test_list_orders_by_update() {
        let store = SqliteConversationStore::in_memory().unwrap();
        let first = store.create_conversation("alice", None).await.unwrap();
        let second = store.create_conversation("alice", None).await.unwrap();
        store.create_conversation("bob", None).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store
            .append_message(first.id, Role::User, "bump", None)
            .await
            .unwrap();

        let listed = store.list_conversations("alice", 0, 10).await.unwrap();
        assert_eq!(
            listed.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );
        assert_eq!(store.list_conversations("alice", 0, 1).await.unwrap().len(), 1);
        assert!(store.list_conversations("carol", 0, 10).await.unwrap().is_empty());
    }
}
