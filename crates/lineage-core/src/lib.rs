//! lineage-core: Shared types, configuration, and error handling for Lineage.
//!
//! This crate provides the foundational pieces used across all Lineage crates:
//! - Person and Link domain types for the family graph
//! - Response views (neighborhood, immediate family)
//! - The generic query value model for ad-hoc read queries
//! - The boundary error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;
pub mod value;

pub use config::AppConfig;
pub use error::LineageError;
pub use types::{ImmediateFamily, Link, NeighborhoodView, Person, RelationKind};
pub use value::{PathValue, QueryRow, QueryValue};
