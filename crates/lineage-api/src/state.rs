//! Shared request state.

use std::sync::Arc;

use lineage_core::AppConfig;
use lineage_graph::GraphClient;
use lineage_query::RateLimiter;

/// State handed to every handler. Clone is cheap: the graph client is
/// internally pooled and the limiter is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub graph: GraphClient,
    pub limiter: Arc<RateLimiter>,
}
