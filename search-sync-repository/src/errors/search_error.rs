//! Search error types.
//!
//! This module defines the error types that can occur while talking to the
//! search engine. Each variant names the kind of failure so callers can tell
//! an unreachable engine from a malformed response or a missing index.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a single document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Count request failed.
    #[error("Count error: {0}")]
    CountError(String),

    /// Index refresh failed.
    #[error("Refresh error: {0}")]
    RefreshError(String),

    /// Index or document not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse response from search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a count error.
    pub fn count(msg: impl Into<String>) -> Self {
        Self::CountError(msg.into())
    }

    /// Create a refresh error.
    pub fn refresh(msg: impl Into<String>) -> Self {
        Self::RefreshError(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether this error means the index or document does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_kind() {
        assert_eq!(
            SearchError::connection("refused").to_string(),
            "Connection error: refused"
        );
        assert_eq!(SearchError::parse("no hits").to_string(), "Parse error: no hits");
    }

    #[test]
    fn test_is_not_found() {
        assert!(SearchError::not_found("users").is_not_found());
        assert!(!SearchError::query("bad").is_not_found());
    }
}
