//! Rate-limit middleware for the ad-hoc query endpoint.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use lineage_core::LineageError;
use lineage_query::RateDecision;

use crate::error::ApiError;
use crate::state::AppState;

/// Check the caller against the sliding-window limiter before running the
/// request.
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&req);

    match state.limiter.is_allowed(&key).await {
        RateDecision::Allowed => Ok(next.run(req).await),
        RateDecision::Limited { retry_after_secs } => {
            tracing::warn!(client = %key, retry_after_secs, "Rate limit exceeded");
            Err(ApiError(LineageError::RateLimitExceeded {
                retry_after_secs,
                limit: state.config.rate_limit.max_requests,
                window_secs: state.config.rate_limit.window_secs,
            }))
        }
    }
}

/// The limiter key for a request: first `X-Forwarded-For` entry when present
/// (the service runs behind a proxy in production), otherwise the peer
/// address.
fn client_key(req: &Request) -> String {
    if let Some(forwarded) = req.headers().get("x-forwarded-for") {
        if let Ok(value) = forwarded.to_str() {
            if let Some(ip) = value.split(',').next() {
                let ip = ip.trim();
                if !ip.is_empty() {
                    return ip.to_string();
                }
            }
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request() -> axum::http::request::Builder {
        axum::http::Request::builder().uri("/api/query")
    }

    #[test]
    fn forwarded_header_takes_precedence() {
        let req = request()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&req), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut req = request().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4444))));
        assert_eq!(client_key(&req), "192.0.2.1");
    }

    #[test]
    fn unknown_when_nothing_identifies_the_client() {
        let req = request().body(Body::empty()).unwrap();
        assert_eq!(client_key(&req), "unknown");
    }
}
