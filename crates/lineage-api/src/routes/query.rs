//! The rate-limited ad-hoc query endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use lineage_core::{LineageError, QueryRow};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub results: Vec<QueryRow>,
    pub count: usize,
}

/// `POST /api/query {"query": "..."}`
pub async fn post_query(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<QueryResponse>, ApiError> {
    let raw = body
        .get("query")
        .and_then(|q| q.as_str())
        .ok_or_else(|| LineageError::InvalidInput("field 'query' is required".to_string()))?;

    let results = lineage_query::execute_query(&state.graph, raw).await?;
    let count = results.len();
    Ok(Json(QueryResponse { results, count }))
}
