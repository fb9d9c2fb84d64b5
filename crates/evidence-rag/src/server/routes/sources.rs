//! Source catalogue listing

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::citation::CatalogEntry;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CatalogParams {
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub count: usize,
    pub sources: Vec<CatalogEntry>,
}

/// GET /api/sources - catalogued documents, optionally filtered by title
pub async fn list_sources(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Json<CatalogResponse> {
    let filter = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let sources = state.url_table().catalog(filter);
    Json(CatalogResponse {
        count: sources.len(),
        sources,
    })
}
