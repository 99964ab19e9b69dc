//! Tree, person, and family endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use lineage_core::{ImmediateFamily, NeighborhoodView, Person};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TreeParams {
    #[serde(rename = "centerNodeId", default)]
    center_node_id: String,
    #[serde(default)]
    depth: Option<String>,
}

/// `GET /api/tree?centerNodeId=&depth=`
///
/// Depth arrives as text so a non-numeric value falls back to the default
/// instead of failing extraction.
pub async fn get_tree(
    State(state): State<AppState>,
    Query(params): Query<TreeParams>,
) -> Result<Json<NeighborhoodView>, ApiError> {
    let depth = params.depth.as_deref().and_then(|s| s.parse::<i64>().ok());
    let view =
        lineage_query::extract_neighborhood(&state.graph, &params.center_node_id, depth).await?;
    Ok(Json(view))
}

#[derive(Debug, Serialize)]
pub struct PersonsResponse {
    pub persons: Vec<Person>,
    pub count: usize,
}

/// `GET /api/persons`
pub async fn get_all_persons(
    State(state): State<AppState>,
) -> Result<Json<PersonsResponse>, ApiError> {
    let persons = lineage_query::list_persons(&state.graph).await?;
    let count = persons.len();
    Ok(Json(PersonsResponse { persons, count }))
}

/// `GET /api/person/{id}`
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    let person = lineage_query::fetch_person(&state.graph, &id).await?;
    Ok(Json(person))
}

/// `GET /api/person/{id}/family`
pub async fn get_family(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ImmediateFamily>, ApiError> {
    let family = lineage_query::resolve_family(&state.graph, &id).await?;
    Ok(Json(family))
}
