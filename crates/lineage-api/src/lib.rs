//! lineage-api: the HTTP surface over the Lineage query layer.
//!
//! Routing, CORS, the rate-limit middleware on the ad-hoc query endpoint,
//! and the mocked CSV upload live here; everything with real invariants is
//! in `lineage-query` and below.

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Assemble the service router.
///
/// Only `/api/query` sits behind the rate limiter: tree and person reads are
/// bounded by depth and id, ad-hoc queries are not.
pub fn build_router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/api/query", post(routes::query::post_query))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ));

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/tree", get(routes::tree::get_tree))
        .route("/api/persons", get(routes::tree::get_all_persons))
        .route("/api/person/{id}", get(routes::tree::get_person))
        .route("/api/person/{id}/family", get(routes::tree::get_family))
        .route("/api/upload", post(routes::upload::upload_csv))
        .merge(gated)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors::cors_layer(
                    &state.config.cors.allowed_origins,
                )),
        )
        .with_state(state)
}
