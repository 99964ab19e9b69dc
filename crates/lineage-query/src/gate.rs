//! The read-only gate in front of ad-hoc queries.
//!
//! The gate is a lexical filter, not a parser: query text is trimmed,
//! uppercased, and scanned for write keywords as substrings. It can reject a
//! keyword inside an identifier or string literal and it cannot catch every
//! obfuscated write; the exact matching behavior is part of the observable
//! contract and must not change. Queries that pass run on the adapter's
//! read-only connection, which bounds the blast radius if the filter is
//! bypassed.

use lineage_core::{LineageError, QueryRow};
use lineage_graph::GraphClient;

/// Blocked write keywords, scanned in this order; the first match is the one
/// reported.
pub const WRITE_KEYWORDS: [&str; 7] = [
    "CREATE", "DELETE", "MERGE", "SET", "REMOVE", "DROP", "DETACH",
];

/// Screen raw query text. Returns the trimmed text if it may run.
pub fn screen(raw: &str) -> Result<&str, LineageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LineageError::EmptyQuery);
    }

    let upper = trimmed.to_uppercase();
    for keyword in WRITE_KEYWORDS {
        if upper.contains(keyword) {
            return Err(LineageError::WriteNotAllowed { keyword });
        }
    }

    Ok(trimmed)
}

/// Screen and execute ad-hoc query text, normalizing the result rows.
pub async fn execute_query(
    client: &GraphClient,
    raw: &str,
) -> Result<Vec<QueryRow>, LineageError> {
    let text = screen(raw)?;
    tracing::debug!(chars = text.len(), "Executing gated read query");
    client
        .run_read_query(text)
        .await
        .map_err(|e| LineageError::query_failure("ad-hoc query", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_read_query_passes() {
        assert_eq!(screen("MATCH (n) RETURN n").unwrap(), "MATCH (n) RETURN n");
    }

    #[test]
    fn trims_before_screening() {
        assert_eq!(screen("  MATCH (n) RETURN n  ").unwrap(), "MATCH (n) RETURN n");
    }

    #[test]
    fn empty_and_whitespace_rejected() {
        assert!(matches!(screen(""), Err(LineageError::EmptyQuery)));
        assert!(matches!(screen("   \t\n"), Err(LineageError::EmptyQuery)));
    }

    #[test]
    fn write_keywords_rejected_case_insensitively() {
        let err = screen("CREATE (n:Person) RETURN n").unwrap_err();
        assert!(matches!(
            err,
            LineageError::WriteNotAllowed { keyword: "CREATE" }
        ));

        let err = screen("match (n) detach delete n").unwrap_err();
        // DELETE precedes DETACH in the blocklist, so it is the one reported.
        assert!(matches!(
            err,
            LineageError::WriteNotAllowed { keyword: "DELETE" }
        ));
    }

    #[test]
    fn first_match_follows_blocklist_order_not_text_order() {
        let err = screen("MATCH (n) SET n.x = 1 MERGE (m)").unwrap_err();
        assert!(matches!(
            err,
            LineageError::WriteNotAllowed { keyword: "MERGE" }
        ));
    }

    #[test]
    fn substring_match_over_rejects_identifiers() {
        // "offset" contains SET; the lexical filter rejects it. Intentional.
        let err = screen("MATCH (n) RETURN n.offset").unwrap_err();
        assert!(matches!(
            err,
            LineageError::WriteNotAllowed { keyword: "SET" }
        ));
    }
}
