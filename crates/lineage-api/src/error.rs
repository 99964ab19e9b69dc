//! Translation of the boundary error taxonomy into HTTP responses.
//!
//! Every error renders as `{"error": {"code", "message", "details?"}}`; the
//! code comes from [`LineageError::code`] so the mapping stays deterministic.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use lineage_core::LineageError;

/// Wrapper making [`LineageError`] an axum response.
#[derive(Debug)]
pub struct ApiError(pub LineageError);

impl From<LineageError> for ApiError {
    fn from(err: LineageError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LineageError::NotFound(_) => StatusCode::NOT_FOUND,
            LineageError::EmptyQuery | LineageError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LineageError::WriteNotAllowed { .. } => StatusCode::FORBIDDEN,
            LineageError::QueryFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            LineageError::RateLimitExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            LineageError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match &self.0 {
            LineageError::WriteNotAllowed { keyword } => {
                Some(serde_json::json!({ "blocked_keyword": keyword }))
            }
            LineageError::RateLimitExceeded {
                retry_after_secs,
                limit,
                window_secs,
            } => Some(serde_json::json!({
                "retry_after_seconds": retry_after_secs,
                "limit": limit,
                "window_seconds": window_secs,
            })),
            LineageError::NotFound(id) => Some(serde_json::json!({ "id": id })),
            LineageError::QueryFailure { source, .. } => {
                Some(serde_json::json!({ "error": source.to_string() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = Json(ErrorBody {
            error: ErrorDetail {
                code: self.0.code(),
                message: self.0.to_string(),
                details: self.details(),
            },
        });

        if let LineageError::RateLimitExceeded {
            retry_after_secs, ..
        } = &self.0
        {
            let headers = [("Retry-After", retry_after_secs.to_string())];
            return (status, headers, body).into_response();
        }

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            ApiError(LineageError::NotFound("p1".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(LineageError::EmptyQuery).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(LineageError::WriteNotAllowed { keyword: "SET" }).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError(LineageError::query_failure("x", anyhow::anyhow!("boom"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError(LineageError::RateLimitExceeded {
                retry_after_secs: 1,
                limit: 5,
                window_secs: 60
            })
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError(LineageError::Unauthorized("nope".into())).status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn rate_limit_details_carry_the_window() {
        let err = ApiError(LineageError::RateLimitExceeded {
            retry_after_secs: 12,
            limit: 5,
            window_secs: 60,
        });
        let details = err.details().unwrap();
        assert_eq!(details["retry_after_seconds"], 12);
        assert_eq!(details["limit"], 5);
        assert_eq!(details["window_seconds"], 60);
    }

    #[test]
    fn rate_limit_response_sets_retry_after_header() {
        let response = ApiError(LineageError::RateLimitExceeded {
            retry_after_secs: 7,
            limit: 5,
            window_secs: 60,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "7");
    }
}
