//! lineage-query: the query layer between the HTTP surface and the store.
//!
//! Four components:
//! - [`neighborhood`]: bounded-depth neighborhood extraction into a
//!   deduplicated node/link view
//! - [`family`]: immediate-family resolution
//! - [`gate`]: the lexical write-keyword gate in front of ad-hoc read queries
//! - [`ratelimit`]: the per-client sliding-window rate limiter
//!
//! Everything here talks to the store through [`lineage_graph::GraphClient`]
//! and performs no retries of its own.

pub mod family;
pub mod gate;
pub mod neighborhood;
pub mod persons;
pub mod ratelimit;

pub use family::resolve_family;
pub use gate::execute_query;
pub use neighborhood::extract_neighborhood;
pub use persons::{fetch_person, list_persons};
pub use ratelimit::{RateDecision, RateLimiter};
