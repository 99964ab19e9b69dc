//! The boundary error taxonomy.
//!
//! Every failure the query layer can produce maps deterministically to a
//! stable machine-readable code; the HTTP layer translates codes into
//! transport statuses. Store failures are wrapped with operation context and
//! never retried here.

use thiserror::Error;

/// Top-level error type for the Lineage query layer.
#[derive(Error, Debug)]
pub enum LineageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("query cannot be empty")]
    EmptyQuery,

    #[error("write operations are not allowed (blocked keyword: {keyword})")]
    WriteNotAllowed { keyword: &'static str },

    #[error("graph operation '{operation}' failed")]
    QueryFailure {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimitExceeded {
        retry_after_secs: u64,
        limit: u32,
        window_secs: u64,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl LineageError {
    /// Wrap a store failure with the operation it happened in.
    pub fn query_failure(
        operation: &'static str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::QueryFailure {
            operation,
            source: source.into(),
        }
    }

    /// The stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::EmptyQuery => "EMPTY_QUERY",
            Self::WriteNotAllowed { .. } => "WRITE_NOT_ALLOWED",
            Self::QueryFailure { .. } => "QUERY_ERROR",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            Self::InvalidInput(_) => "INVALID_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_kind() {
        assert_eq!(LineageError::NotFound("p1".into()).code(), "NOT_FOUND");
        assert_eq!(LineageError::EmptyQuery.code(), "EMPTY_QUERY");
        assert_eq!(
            LineageError::WriteNotAllowed { keyword: "CREATE" }.code(),
            "WRITE_NOT_ALLOWED"
        );
        assert_eq!(
            LineageError::query_failure("tree", anyhow::anyhow!("boom")).code(),
            "QUERY_ERROR"
        );
        assert_eq!(
            LineageError::RateLimitExceeded {
                retry_after_secs: 3,
                limit: 5,
                window_secs: 60
            }
            .code(),
            "RATE_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn query_failure_keeps_the_cause() {
        let err = LineageError::query_failure("neighborhood", anyhow::anyhow!("timed out"));
        let source = std::error::Error::source(&err).expect("source attached");
        assert!(source.to_string().contains("timed out"));
    }
}
