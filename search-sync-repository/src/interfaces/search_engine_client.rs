//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use search_sync_shared::{CountRequest, DeleteRequest, IndexRequest, SearchRequest};

/// Abstract interface for search engine operations.
///
/// This trait defines the operations a synchronized model needs from a search
/// engine. Implementations can be swapped for different backends (OpenSearch,
/// mock, etc.) enabling easy testing and potential future migrations.
///
/// Responses are returned as raw JSON so callers see exactly what the engine
/// answered.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`; the error variant names the
/// kind of failure.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Create or replace a document.
    ///
    /// # Arguments
    ///
    /// * `request` - Target `(index, doc_type, id)` and the document body
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The engine's response body
    /// * `Err(SearchError)` - If indexing fails
    async fn index(&self, request: &IndexRequest) -> Result<Value, SearchError>;

    /// Delete a document.
    ///
    /// A document that does not exist is not an error; the engine's
    /// not-found response is returned as is.
    ///
    /// # Arguments
    ///
    /// * `request` - Target `(index, doc_type, id)`
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The engine's response body
    /// * `Err(SearchError)` - If the deletion fails
    async fn delete(&self, request: &DeleteRequest) -> Result<Value, SearchError>;

    /// Run a single-field search.
    ///
    /// # Arguments
    ///
    /// * `request` - Target, size limit and the field clause
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw search response (`hits.hits[]`)
    /// * `Err(SearchError)` - If the search fails
    ///
    /// # Example
    ///
    /// ```ignore
    /// let response = client.search(&request).await?;
    /// let hits = response["hits"]["hits"].as_array();
    /// ```
    async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError>;

    /// Count the documents of an `(index, doc_type)` pair.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw count response (`count`)
    /// * `Err(SearchError::NotFound)` - If the index does not exist
    /// * `Err(SearchError)` - If the count fails
    async fn count(&self, request: &CountRequest) -> Result<Value, SearchError>;

    /// Make recent writes to an `(index, doc_type)` pair visible to search.
    async fn refresh(&self, index: &str, doc_type: &str) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
