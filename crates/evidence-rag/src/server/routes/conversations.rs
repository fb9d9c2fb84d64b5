//! Conversation history endpoints

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use super::owner_id;
use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{Conversation, Message};

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateConversation {
    #[serde(default)]
    pub title: Option<String>,
}

/// GET /api/queries/conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Conversation>>> {
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
    let conversations = state
        .service()
        .conversations(&owner_id(&headers), params.skip, limit)
        .await?;
    Ok(Json(conversations))
}

/// POST /api/queries/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateConversation>,
) -> Result<Json<Conversation>> {
    let title = body.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let conversation = state
        .service()
        .create_conversation(&owner_id(&headers), title)
        .await?;
    Ok(Json(conversation))
}

/// GET /api/queries/conversations/:id
pub async fn get_conversation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Conversation>> {
    let conversation = state.service().conversation(&owner_id(&headers), id).await?;
    Ok(Json(conversation))
}

/// GET /api/queries/conversations/:id/messages
pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Message>>> {
    let messages = state.service().messages(&owner_id(&headers), id).await?;
    Ok(Json(messages))
}
