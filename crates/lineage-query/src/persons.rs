//! Single-person lookup and listing, mapped into the boundary taxonomy.

use lineage_core::{LineageError, Person};
use lineage_graph::{GraphClient, GraphError};

/// Fetch one person by external id.
pub async fn fetch_person(client: &GraphClient, id: &str) -> Result<Person, LineageError> {
    client.fetch_person(id).await.map_err(|e| match e {
        GraphError::NotFound { id } => LineageError::NotFound(id),
        other => LineageError::query_failure("person lookup", other),
    })
}

/// List every person in the store.
pub async fn list_persons(client: &GraphClient) -> Result<Vec<Person>, LineageError> {
    client
        .list_persons()
        .await
        .map_err(|e| LineageError::query_failure("person listing", e))
}
