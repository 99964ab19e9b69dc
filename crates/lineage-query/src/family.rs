//! Immediate-family resolution.

use std::collections::HashSet;

use lineage_core::{ImmediateFamily, LineageError, Person};
use lineage_graph::{GraphClient, GraphError};

/// Resolve a person's immediate family: spouse (0 or 1), parents, children,
/// and siblings, each collection deduplicated by id and present even when
/// empty.
pub async fn resolve_family(
    client: &GraphClient,
    id: &str,
) -> Result<ImmediateFamily, LineageError> {
    let relations = client
        .fetch_immediate_relations(id)
        .await
        .map_err(|e| match e {
            GraphError::NotFound { id } => LineageError::NotFound(id),
            other => LineageError::query_failure("immediate family", other),
        })?;

    Ok(ImmediateFamily {
        person: relations.person,
        spouse: relations.spouse,
        parents: dedup_by_id(relations.parents),
        children: dedup_by_id(relations.children),
        siblings: dedup_by_id(relations.siblings),
    })
}

fn dedup_by_id(persons: Vec<Person>) -> Vec<Person> {
    let mut seen = HashSet::new();
    persons
        .into_iter()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str) -> Person {
        Person {
            id: id.to_string(),
            ..Person::default()
        }
    }

    #[test]
    fn dedup_by_id_keeps_first_occurrence() {
        let deduped = dedup_by_id(vec![person("a"), person("b"), person("a"), person("c")]);
        let ids: Vec<&str> = deduped.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn dedup_by_id_passes_empty_through() {
        assert!(dedup_by_id(vec![]).is_empty());
    }
}
