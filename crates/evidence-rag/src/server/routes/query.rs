//! Query endpoints, one per response contract

use axum::{extract::State, http::HeaderMap, Json};
use std::time::Instant;

use super::{owner_id, RETRIEVER_TYPE_HEADER};
use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{FormattedResponse, OutputMode, QueryRequest};

/// POST /api/queries/query - answer with the raw contract
pub async fn query_raw(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> Result<Json<FormattedResponse>> {
    run(&state, &headers, request, OutputMode::Raw).await
}

/// POST /api/rag/query - answer with the standard RAG contract
pub async fn query_rag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> Result<Json<FormattedResponse>> {
    run(&state, &headers, request, OutputMode::StandardRag).await
}

/// POST /api/ui/query - answer with the sources panel
pub async fn query_ui(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<QueryRequest>,
) -> Result<Json<FormattedResponse>> {
    run(&state, &headers, request, OutputMode::Ui).await
}

async fn run(
    state: &AppState,
    headers: &HeaderMap,
    request: QueryRequest,
    mode: OutputMode,
) -> Result<Json<FormattedResponse>> {
    let start = Instant::now();
    let owner = owner_id(headers);
    let strategy = headers
        .get(RETRIEVER_TYPE_HEADER)
        .and_then(|v| v.to_str().ok());

    tracing::info!(?mode, ?strategy, "Query: \"{}\"", request.query);

    let response = state
        .service()
        .query(&owner, &request.query, request.conversation_id, strategy, mode)
        .await?;

    tracing::info!("Query completed in {}ms", start.elapsed().as_millis());
    Ok(Json(response))
}
