//! Generic values returned by the ad-hoc query endpoint.
//!
//! Ad-hoc read queries produce heterogeneous rows: graph nodes, relationships,
//! paths, or plain scalar/collection values, discovered only at runtime. They
//! are modeled as a closed tagged variant so nothing above the store adapter
//! depends on driver-native types.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Link, Person};

/// One result row: RETURN column name to converted value.
pub type QueryRow = BTreeMap<String, QueryValue>;

/// A path value: the constituent node and relationship lists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathValue {
    pub nodes: Vec<Person>,
    pub relationships: Vec<Link>,
}

/// Any value an ad-hoc read query can produce.
///
/// Nodes come back Person-shaped and relationships Link-shaped; everything
/// else passes through, converted recursively over lists and maps.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum QueryValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Node(Person),
    Relationship(Link),
    Path(PathValue),
    List(Vec<QueryValue>),
    Map(BTreeMap<String, QueryValue>),
}

impl QueryValue {
    /// Convert a self-describing JSON value, recursively.
    ///
    /// This covers the scalar/collection tail of the conversion; graph
    /// entities are recognized upstream at the adapter boundary and never
    /// reach this path.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_converts_scalars() {
        assert_eq!(QueryValue::from_json(serde_json::json!(null)), QueryValue::Null);
        assert_eq!(QueryValue::from_json(serde_json::json!(true)), QueryValue::Bool(true));
        assert_eq!(QueryValue::from_json(serde_json::json!(42)), QueryValue::Int(42));
        assert_eq!(QueryValue::from_json(serde_json::json!(1.5)), QueryValue::Float(1.5));
        assert_eq!(
            QueryValue::from_json(serde_json::json!("x")),
            QueryValue::String("x".into())
        );
    }

    #[test]
    fn from_json_recurses_into_collections() {
        let converted = QueryValue::from_json(serde_json::json!({
            "counts": [1, 2],
            "inner": {"flag": false}
        }));
        let QueryValue::Map(map) = converted else {
            panic!("expected map");
        };
        assert_eq!(
            map["counts"],
            QueryValue::List(vec![QueryValue::Int(1), QueryValue::Int(2)])
        );
        let QueryValue::Map(inner) = &map["inner"] else {
            panic!("expected nested map");
        };
        assert_eq!(inner["flag"], QueryValue::Bool(false));
    }

    #[test]
    fn untagged_serialization_is_transparent() {
        let value = QueryValue::List(vec![
            QueryValue::Int(1),
            QueryValue::String("two".into()),
            QueryValue::Null,
        ]);
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!([1, "two", null])
        );
    }
}
