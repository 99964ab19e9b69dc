//! lineage-graph: Neo4j adapter for the Lineage family graph.
//!
//! This crate is the only place that touches the store driver. It owns
//! connection pooling and per-call deadlines, and translates store-native
//! nodes, relationships, and paths into the domain's Person/Link value types
//! at the boundary; nothing above it sees neo4rs types.
//!
//! All operations are reads. Ad-hoc query text runs on a dedicated
//! read-only connection when one is configured.

pub mod client;
pub mod convert;
pub mod queries;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use queries::ImmediateRelations;
