//! Translation from store-native values to domain values.
//!
//! Conversion happens here, at the adapter boundary: nodes become
//! Person-shaped records, relationships become Link-shaped records keyed by
//! the endpoints the driver reports, paths become their constituent lists,
//! and everything else passes through as a generic value, recursively.

use lineage_core::{Link, PathValue, Person, QueryRow, QueryValue, RelationKind};

use crate::client::GraphError;

/// Convert a Person node. Properties are stored as plain strings, booleans,
/// and string lists; anything missing defaults to empty, as the source data
/// is CSV-loaded and sparse.
pub(crate) fn person_from_node(node: &neo4rs::Node) -> Person {
    Person {
        id: node.get::<String>("id").unwrap_or_default(),
        name: node.get::<String>("name").unwrap_or_default(),
        aka: aka_from_node(node),
        gender: node.get::<String>("gender").unwrap_or_default(),
        is_alive: node.get::<bool>("is_alive").unwrap_or(false),
        birth_date: node.get::<String>("birth_date").unwrap_or_default(),
        death_date: node.get::<String>("death_date").ok(),
        current_location: node.get::<String>("current_location").unwrap_or_default(),
        profession: node.get::<String>("profession").unwrap_or_default(),
        photo_url: node.get::<String>("photo_url").unwrap_or_default(),
    }
}

// Older imports stored `aka` as a single string rather than a list.
fn aka_from_node(node: &neo4rs::Node) -> Vec<String> {
    if let Ok(list) = node.get::<Vec<String>>("aka") {
        return list;
    }
    match node.get::<String>("aka") {
        Ok(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    }
}

/// Convert a raw relationship value from an ad-hoc query.
///
/// Unlike neighborhood links, a bare relationship only carries the driver's
/// node identities for its endpoints, so those are stringified as-is.
/// Unrecognized relationship types yield `None`.
pub(crate) fn link_from_relation(rel: &neo4rs::Relation) -> Option<Link> {
    let kind = RelationKind::parse(rel.typ())?;
    Some(Link {
        source: rel.start_node_id().to_string(),
        target: rel.end_node_id().to_string(),
        kind,
        start_date: rel.get::<String>("start_date").ok(),
        end_date: rel.get::<String>("end_date").ok(),
    })
}

/// Convert a path into its node and relationship lists.
///
/// Path segment relationships are unbounded (no endpoint identities), so each
/// is keyed by the external ids of the adjacent nodes in traversal order.
pub(crate) fn path_value(path: &neo4rs::Path) -> PathValue {
    let nodes: Vec<Person> = path.nodes().iter().map(person_from_node).collect();

    let mut relationships = Vec::new();
    for (i, rel) in path.rels().iter().enumerate() {
        let Some(kind) = RelationKind::parse(rel.typ()) else {
            continue;
        };
        let source = nodes.get(i).map(|p| p.id.clone()).unwrap_or_default();
        let target = nodes.get(i + 1).map(|p| p.id.clone()).unwrap_or_default();
        relationships.push(Link {
            source,
            target,
            kind,
            start_date: rel.get::<String>("start_date").ok(),
            end_date: rel.get::<String>("end_date").ok(),
        });
    }

    PathValue {
        nodes,
        relationships,
    }
}

/// Convert one ad-hoc result row into column → QueryValue.
///
/// The self-describing representation gives the column names and the
/// scalar/collection values, but collapses graph entities into bare property
/// maps; typed probes per column recover those before falling back.
pub(crate) fn convert_row(row: &neo4rs::Row) -> Result<QueryRow, GraphError> {
    let shape: serde_json::Map<String, serde_json::Value> = row
        .to()
        .map_err(|e| GraphError::Deserialization(format!("failed to read result row: {e}")))?;

    let mut out = QueryRow::new();
    for (column, collapsed) in shape {
        let value = convert_column(row, &column, collapsed);
        out.insert(column, value);
    }
    Ok(out)
}

fn convert_column(row: &neo4rs::Row, column: &str, collapsed: serde_json::Value) -> QueryValue {
    if let Ok(node) = row.get::<neo4rs::Node>(column) {
        return QueryValue::Node(person_from_node(&node));
    }
    if let Ok(rel) = row.get::<neo4rs::Relation>(column) {
        if let Some(link) = link_from_relation(&rel) {
            return QueryValue::Relationship(link);
        }
    }
    if let Ok(path) = row.get::<neo4rs::Path>(column) {
        return QueryValue::Path(path_value(&path));
    }
    // collect(n) and friends: lists of entities probe as typed vectors. An
    // empty list matches too, but converts identically either way.
    if let Ok(nodes) = row.get::<Vec<neo4rs::Node>>(column) {
        if !nodes.is_empty() {
            return QueryValue::List(
                nodes
                    .iter()
                    .map(|n| QueryValue::Node(person_from_node(n)))
                    .collect(),
            );
        }
    }
    if let Ok(rels) = row.get::<Vec<neo4rs::Relation>>(column) {
        let links: Vec<QueryValue> = rels
            .iter()
            .filter_map(link_from_relation)
            .map(QueryValue::Relationship)
            .collect();
        if !links.is_empty() {
            return QueryValue::List(links);
        }
    }
    QueryValue::from_json(collapsed)
}
