//! The read operations against the family graph.
//!
//! Each operation is a single attempt under an explicit deadline: 5s for
//! single-entity lookups, 10s for traversals, listings, and ad-hoc queries.

use std::time::Duration;

use neo4rs::query;

use lineage_core::{Link, Person, QueryRow, RelationKind};

use crate::client::{with_deadline, GraphClient, GraphError};
use crate::convert::{convert_row, person_from_node};

const LOOKUP_DEADLINE: Duration = Duration::from_secs(5);
const TRAVERSAL_DEADLINE: Duration = Duration::from_secs(10);

/// Raw immediate relations as fetched. Collections may contain duplicates;
/// the query layer deduplicates.
#[derive(Debug, Clone)]
pub struct ImmediateRelations {
    pub person: Person,
    pub spouse: Option<Person>,
    pub parents: Vec<Person>,
    pub children: Vec<Person>,
    pub siblings: Vec<Person>,
}

/// Nodes within `depth` undirected hops of the center, plus the induced
/// relationships between the discovered nodes keyed by external ids.
fn neighborhood_nodes_cypher(depth: u8) -> String {
    format!(
        "MATCH (center:Person {{id: $center_id}})
         OPTIONAL MATCH (center)-[*1..{depth}]-(related:Person)
         WITH collect(DISTINCT center) + collect(DISTINCT related) AS all_nodes
         UNWIND all_nodes AS n
         RETURN DISTINCT n"
    )
}

const INDUCED_LINKS_CYPHER: &str = "MATCH (a:Person)-[rel:PARENT_CHILD|SPOUSE|SIBLING]->(b:Person)
     WHERE a.id IN $ids AND b.id IN $ids
     RETURN a.id AS source, b.id AS target, type(rel) AS kind,
            rel.start_date AS start_date, rel.end_date AS end_date";

impl GraphClient {
    /// Fetch the raw neighborhood of `center_id`: every node within `depth`
    /// hops (undirected reachability), and every recognized relationship
    /// between any two discovered nodes.
    ///
    /// Edges are derived from the discovered node set, not the traversed
    /// paths, so they carry external person identifiers and include
    /// relations between nodes reached by different branches. An unknown
    /// center yields an empty result, not an error.
    pub async fn fetch_neighborhood(
        &self,
        center_id: &str,
        depth: u8,
    ) -> Result<(Vec<Person>, Vec<Link>), GraphError> {
        with_deadline("fetch_neighborhood", TRAVERSAL_DEADLINE, async {
            let q = query(&neighborhood_nodes_cypher(depth)).param("center_id", center_id);
            let rows = self.query_rows(q).await?;

            let mut nodes = Vec::with_capacity(rows.len());
            for row in rows {
                let node: neo4rs::Node = row.get("n").map_err(|e| {
                    GraphError::Deserialization(format!("failed to read neighborhood node: {e}"))
                })?;
                nodes.push(person_from_node(&node));
            }

            if nodes.is_empty() {
                return Ok((nodes, Vec::new()));
            }

            let ids: Vec<String> = nodes.iter().map(|p| p.id.clone()).collect();
            let q = query(INDUCED_LINKS_CYPHER).param("ids", ids);
            let rows = self.query_rows(q).await?;

            let mut links = Vec::with_capacity(rows.len());
            for row in rows {
                let kind_label: String = row.get("kind").unwrap_or_default();
                let Some(kind) = RelationKind::parse(&kind_label) else {
                    continue;
                };
                links.push(Link {
                    source: row.get::<String>("source").unwrap_or_default(),
                    target: row.get::<String>("target").unwrap_or_default(),
                    kind,
                    start_date: row.get::<String>("start_date").ok(),
                    end_date: row.get::<String>("end_date").ok(),
                });
            }

            Ok((nodes, links))
        })
        .await
    }

    /// Fetch a single person by external id.
    pub async fn fetch_person(&self, id: &str) -> Result<Person, GraphError> {
        with_deadline("fetch_person", LOOKUP_DEADLINE, async {
            let q = query("MATCH (p:Person {id: $id}) RETURN p").param("id", id);

            match self.query_one(q).await? {
                Some(row) => {
                    let node: neo4rs::Node = row.get("p").map_err(|e| {
                        GraphError::Deserialization(format!("failed to read person node: {e}"))
                    })?;
                    Ok(person_from_node(&node))
                }
                None => Err(GraphError::NotFound { id: id.to_string() }),
            }
        })
        .await
    }

    /// Fetch a person and their raw immediate relations.
    pub async fn fetch_immediate_relations(
        &self,
        id: &str,
    ) -> Result<ImmediateRelations, GraphError> {
        with_deadline("fetch_immediate_relations", LOOKUP_DEADLINE, async {
            let q = query(
                "MATCH (p:Person {id: $id})
                 OPTIONAL MATCH (p)-[:SPOUSE]-(spouse:Person)
                 OPTIONAL MATCH (p)<-[:PARENT_CHILD]-(parent:Person)
                 OPTIONAL MATCH (p)-[:PARENT_CHILD]->(child:Person)
                 OPTIONAL MATCH (p)-[:SIBLING]-(sibling:Person)
                 RETURN p, spouse, collect(DISTINCT parent) AS parents,
                        collect(DISTINCT child) AS children,
                        collect(DISTINCT sibling) AS siblings",
            )
            .param("id", id);

            match self.query_one(q).await? {
                Some(row) => {
                    let node: neo4rs::Node = row.get("p").map_err(|e| {
                        GraphError::Deserialization(format!("failed to read person node: {e}"))
                    })?;
                    let spouse = row
                        .get::<neo4rs::Node>("spouse")
                        .ok()
                        .map(|n| person_from_node(&n));
                    let parents = collected_persons(&row, "parents");
                    let children = collected_persons(&row, "children");
                    let siblings = collected_persons(&row, "siblings");

                    Ok(ImmediateRelations {
                        person: person_from_node(&node),
                        spouse,
                        parents,
                        children,
                        siblings,
                    })
                }
                None => Err(GraphError::NotFound { id: id.to_string() }),
            }
        })
        .await
    }

    /// Execute gated ad-hoc query text on the read-only connection and
    /// normalize the rows. The caller has already screened the text.
    pub async fn run_read_query(&self, text: &str) -> Result<Vec<QueryRow>, GraphError> {
        with_deadline("run_read_query", TRAVERSAL_DEADLINE, async {
            let rows = self.read_only_rows(query(text)).await?;
            rows.iter().map(convert_row).collect()
        })
        .await
    }

    /// List every person in the store.
    pub async fn list_persons(&self) -> Result<Vec<Person>, GraphError> {
        with_deadline("list_persons", TRAVERSAL_DEADLINE, async {
            let rows = self.query_rows(query("MATCH (p:Person) RETURN p")).await?;
            let mut persons = Vec::with_capacity(rows.len());
            for row in rows {
                let node: neo4rs::Node = row.get("p").map_err(|e| {
                    GraphError::Deserialization(format!("failed to read person node: {e}"))
                })?;
                persons.push(person_from_node(&node));
            }
            Ok(persons)
        })
        .await
    }
}

fn collected_persons(row: &neo4rs::Row, column: &str) -> Vec<Person> {
    let nodes: Vec<neo4rs::Node> = row.get(column).unwrap_or_default();
    nodes.iter().map(person_from_node).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_cypher_interpolates_depth() {
        let cypher = neighborhood_nodes_cypher(3);
        assert!(cypher.contains("[*1..3]"));
        assert!(cypher.contains("collect(DISTINCT center)"));
    }

    #[test]
    fn induced_links_cypher_filters_recognized_kinds() {
        assert!(INDUCED_LINKS_CYPHER.contains("PARENT_CHILD|SPOUSE|SIBLING"));
        assert!(INDUCED_LINKS_CYPHER.contains("a.id IN $ids"));
        assert!(INDUCED_LINKS_CYPHER.contains("b.id IN $ids"));
    }
}
