//! Core domain types for the Lineage family graph.
//!
//! These are read-only projections materialized per request from the store;
//! they carry the externally assigned person identifiers, never store-internal
//! ones.

use serde::{Deserialize, Serialize};

/// An individual in the family graph.
///
/// `id` is externally assigned, immutable, and globally unique within the
/// store. Dates are ISO-8601 calendar-date strings as loaded from the source
/// CSV data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub aka: Vec<String>,
    pub gender: String,
    pub is_alive: bool,
    pub birth_date: String,
    pub death_date: Option<String>,
    pub current_location: String,
    pub profession: String,
    pub photo_url: String,
}

/// The recognized familial relationship kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationKind {
    ParentChild,
    Spouse,
    Sibling,
}

impl RelationKind {
    /// The relationship type label as stored in the graph.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ParentChild => "PARENT_CHILD",
            Self::Spouse => "SPOUSE",
            Self::Sibling => "SIBLING",
        }
    }

    /// Parse a graph relationship type label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "PARENT_CHILD" => Some(Self::ParentChild),
            "SPOUSE" => Some(Self::Spouse),
            "SIBLING" => Some(Self::Sibling),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed relationship between two persons, keyed by external ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(rename = "relationship")]
    pub kind: RelationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Link {
    /// The identity triple under which duplicate links are suppressed.
    pub fn key(&self) -> (String, String, RelationKind) {
        (self.source.clone(), self.target.clone(), self.kind)
    }
}

/// A bounded-depth neighborhood: deduplicated nodes plus the induced,
/// deduplicated edge set between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NeighborhoodView {
    pub nodes: Vec<Person>,
    pub links: Vec<Link>,
}

/// A person plus their immediate relations. Collections are deduplicated and
/// present (possibly empty) even when no relation exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImmediateFamily {
    pub person: Person,
    pub parents: Vec<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spouse: Option<Person>,
    pub children: Vec<Person>,
    pub siblings: Vec<Person>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kind_round_trips_through_labels() {
        for kind in [
            RelationKind::ParentChild,
            RelationKind::Spouse,
            RelationKind::Sibling,
        ] {
            assert_eq!(RelationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RelationKind::parse("KNOWS"), None);
    }

    #[test]
    fn link_serializes_with_wire_names() {
        let link = Link {
            source: "p1".into(),
            target: "p2".into(),
            kind: RelationKind::ParentChild,
            start_date: None,
            end_date: None,
        };
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["relationship"], "PARENT_CHILD");
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn immediate_family_omits_absent_spouse() {
        let family = ImmediateFamily {
            person: Person {
                id: "p1".into(),
                name: "Asha".into(),
                ..Person::default()
            },
            parents: vec![],
            spouse: None,
            children: vec![],
            siblings: vec![],
        };
        let json = serde_json::to_value(&family).unwrap();
        assert!(json.get("spouse").is_none());
        assert_eq!(json["parents"], serde_json::json!([]));
    }
}
