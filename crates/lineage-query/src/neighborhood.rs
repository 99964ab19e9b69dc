//! Bounded-depth neighborhood extraction.

use std::collections::HashSet;

use lineage_core::{LineageError, Link, NeighborhoodView, Person};
use lineage_graph::GraphClient;

pub const DEFAULT_DEPTH: u8 = 2;
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 3;

/// The hop depth actually used for a request: `clamp(d, 1, 3)`, with absent
/// (or unparseable, mapped to `None` by the caller) input defaulting to 2.
pub fn effective_depth(requested: Option<i64>) -> u8 {
    match requested {
        Some(d) => d.clamp(i64::from(MIN_DEPTH), i64::from(MAX_DEPTH)) as u8,
        None => DEFAULT_DEPTH,
    }
}

/// Extract the neighborhood of `center_id`.
///
/// The node set is the center plus everything within the effective depth,
/// treating relationships as undirected; the link set is the induced
/// relationship set between discovered nodes, keyed by external ids. An
/// unknown center yields an empty view.
pub async fn extract_neighborhood(
    client: &GraphClient,
    center_id: &str,
    requested_depth: Option<i64>,
) -> Result<NeighborhoodView, LineageError> {
    let depth = effective_depth(requested_depth);
    let (nodes, links) = client
        .fetch_neighborhood(center_id, depth)
        .await
        .map_err(|e| LineageError::query_failure("neighborhood", e))?;

    let view = build_view(nodes, links);
    tracing::debug!(
        center = %center_id,
        depth,
        nodes = view.nodes.len(),
        links = view.links.len(),
        "Extracted neighborhood"
    );
    Ok(view)
}

/// Deduplicate fetched nodes by id and links by (source, target, kind),
/// keeping first occurrences in fetch order.
fn build_view(nodes: Vec<Person>, links: Vec<Link>) -> NeighborhoodView {
    let mut seen_ids = HashSet::new();
    let nodes: Vec<Person> = nodes
        .into_iter()
        .filter(|p| seen_ids.insert(p.id.clone()))
        .collect();

    let mut seen_links = HashSet::new();
    let links: Vec<Link> = links
        .into_iter()
        .filter(|l| seen_links.insert(l.key()))
        .collect();

    NeighborhoodView { nodes, links }
}
