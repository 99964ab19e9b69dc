//! Neo4j connection management and the shared graph client.

use std::time::Duration;

use neo4rs::{ConfigBuilder, Graph, Query};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("person not found: {id}")]
    NotFound { id: String },

    #[error("operation '{operation}' exceeded its deadline of {limit:?}")]
    Deadline {
        operation: &'static str,
        limit: Duration,
    },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Configuration for connecting to Neo4j.
///
/// The optional read-only credential pair is used for the ad-hoc query path;
/// when absent, ad-hoc queries share the primary connection.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub read_only_user: Option<String>,
    pub read_only_password: Option<String>,
    pub database: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "lineage-dev".to_string(),
            read_only_user: None,
            read_only_password: None,
            database: "neo4j".to_string(),
            max_connections: 16,
            fetch_size: 256,
        }
    }
}

/// Thread-safe Neo4j client with connection pooling.
///
/// Holds the primary connection plus the read-only connection backing the
/// ad-hoc query path. Clone is cheap (inner Arc).
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    read_graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let graph = Self::open(config, &config.user, &config.password).await?;

        let read_graph = match (&config.read_only_user, &config.read_only_password) {
            (Some(user), Some(password)) => {
                let ro = Self::open(config, user, password).await?;
                tracing::info!(user = %user, "Read-only connection established");
                ro
            }
            _ => {
                tracing::warn!(
                    "No read-only credentials configured; ad-hoc queries run on the primary connection"
                );
                graph.clone()
            }
        };

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph, read_graph })
    }

    async fn open(config: &GraphConfig, user: &str, password: &str) -> Result<Graph, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(user)
            .password(password)
            .db(config.database.as_str())
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))
    }

    /// Execute a read query on the primary connection and collect all rows.
    pub(crate) async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        Self::collect_rows(&self.graph, query).await
    }

    /// Execute a read query on the primary connection and return the first
    /// row, if any.
    pub(crate) async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }

    /// Execute arbitrary query text on the read-only connection and collect
    /// all rows.
    pub(crate) async fn read_only_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        Self::collect_rows(&self.read_graph, query).await
    }

    async fn collect_rows(graph: &Graph, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }
}

/// Run a store call under an explicit deadline. One attempt, no retry; a
/// breach cancels only this call.
pub(crate) async fn with_deadline<T>(
    operation: &'static str,
    limit: Duration,
    call: impl std::future::Future<Output = Result<T, GraphError>>,
) -> Result<T, GraphError> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(GraphError::Deadline { operation, limit }),
    }
}
