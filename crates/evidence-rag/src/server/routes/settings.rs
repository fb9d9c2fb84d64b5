//! Retriever settings endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::RetrievalStrategy;

#[derive(Debug, Serialize)]
pub struct RetrieverSettings {
    /// Configured process-wide default (null when unset)
    pub retriever_type: Option<RetrievalStrategy>,
    /// Strategy used by queries without an explicit override
    pub effective: RetrievalStrategy,
    pub available: Vec<RetrievalStrategy>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRetriever {
    /// New default; null clears it
    pub retriever_type: Option<String>,
}

/// GET /api/settings/retriever
pub async fn get_retriever(State(state): State<AppState>) -> Json<RetrieverSettings> {
    Json(settings(&state))
}

/// PUT /api/settings/retriever
pub async fn update_retriever(
    State(state): State<AppState>,
    Json(body): Json<UpdateRetriever>,
) -> Result<Json<RetrieverSettings>> {
    let strategy = body
        .retriever_type
        .as_deref()
        .map(str::parse::<RetrievalStrategy>)
        .transpose()?;

    state.selector().set_default(strategy);
    Ok(Json(settings(&state)))
}

fn settings(state: &AppState) -> RetrieverSettings {
    RetrieverSettings {
        retriever_type: state.selector().default_strategy(),
        effective: state.selector().resolve(None),
        available: RetrievalStrategy::ALL.to_vec(),
    }
}
