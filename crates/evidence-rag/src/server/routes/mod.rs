//! API routes for the RAG server

pub mod conversations;
pub mod query;
pub mod settings;
pub mod sources;

use axum::{
    http::HeaderMap,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Per-request retrieval strategy override
pub const RETRIEVER_TYPE_HEADER: &str = "retriever-type";

/// Caller identity, set by the fronting gateway
pub const USER_ID_HEADER: &str = "x-user-id";

/// Owner used when no identity header is present
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Query, one route per response contract
        .route("/queries/query", post(query::query_raw))
        .route("/rag/query", post(query::query_rag))
        .route("/ui/query", post(query::query_ui))
        // Conversation history
        .route(
            "/queries/conversations",
            get(conversations::list_conversations).post(conversations::create_conversation),
        )
        .route("/queries/conversations/:id", get(conversations::get_conversation))
        .route(
            "/queries/conversations/:id/messages",
            get(conversations::list_messages),
        )
        // Settings
        .route(
            "/settings/retriever",
            get(settings::get_retriever).put(settings::update_retriever),
        )
        // Source catalogue
        .route("/sources", get(sources::list_sources))
        // Info
        .route("/info", get(info))
}

/// Caller identity from the request headers
pub(crate) fn owner_id(headers: &HeaderMap) -> String {
    headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_OWNER)
        .to_string()
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "evidence-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Graph-backed RAG with conversation history and source citations",
        "endpoints": {
            "POST /api/queries/query": "Answer with source paths, names and links",
            "POST /api/rag/query": "Answer with one snippet per source",
            "POST /api/ui/query": "Answer with a collapsible sources panel",
            "GET /api/queries/conversations": "List conversations of the caller",
            "POST /api/queries/conversations": "Start a conversation",
            "GET /api/queries/conversations/:id": "Get a conversation",
            "GET /api/queries/conversations/:id/messages": "List messages of a conversation",
            "GET /api/settings/retriever": "Current default retrieval strategy",
            "PUT /api/settings/retriever": "Change the default retrieval strategy",
            "GET /api/sources": "List catalogued source documents"
        },
        "headers": {
            "retriever-type": "vector | vector_cypher | hybrid",
            "x-user-id": "caller identity"
        }
    }))
}
