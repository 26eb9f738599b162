//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::IndicesRefreshParts,
    CountParts, DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::ClientConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::physical_index;
use crate::opensearch::queries::build_search_body;
use search_sync_shared::{CountRequest, DeleteRequest, IndexRequest, SearchRequest};

/// OpenSearch client implementation.
///
/// Each `(index, doc_type)` pair is stored in its own physical index, see
/// [`physical_index`].
///
/// # Example
///
/// ```ignore
/// use search_sync_repository::{ClientConfig, OpenSearchClient, SearchEngineClient};
///
/// let client = OpenSearchClient::new(&ClientConfig::new("http://localhost:9200"))?;
/// let response = client.index(&request).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client from the given configuration.
    ///
    /// No request is sent; use `health_check` to verify the connection.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &ClientConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %config.url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Read a response body as JSON, mapping non-success statuses to errors.
    ///
    /// A 404 becomes `SearchError::NotFound`, other failures go through
    /// `on_error`.
    async fn read_json(
        response: Response,
        on_error: fn(String) -> SearchError,
    ) -> Result<Value, SearchError> {
        let status = response.status_code();
        if status.as_u16() == 404 {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::not_found(body));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Request failed");
            return Err(on_error(format!(
                "Request failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, request), fields(index = %request.index, doc_type = %request.doc_type, id = %request.id))]
    async fn index(&self, request: &IndexRequest) -> Result<Value, SearchError> {
        let index = physical_index(&request.index, &request.doc_type);

        let response = self
            .client
            .index(IndexParts::IndexId(&index, &request.id))
            .body(Value::Object(request.body.clone()))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let body = Self::read_json(response, SearchError::IndexError).await?;

        debug!(index = %index, id = %request.id, "Document indexed");
        Ok(body)
    }

    #[instrument(skip(self, request), fields(index = %request.index, doc_type = %request.doc_type, id = %request.id))]
    async fn delete(&self, request: &DeleteRequest) -> Result<Value, SearchError> {
        let index = physical_index(&request.index, &request.doc_type);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&index, &request.id))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if status.as_u16() == 404 {
            let body = response.json::<Value>().await.unwrap_or_else(|_| {
                json!({ "_id": request.id, "result": "not_found" })
            });
            debug!(index = %index, id = %request.id, "Document to delete was not found");
            return Ok(body);
        }

        let body = Self::read_json(response, SearchError::DeleteError).await?;

        debug!(index = %index, id = %request.id, "Document deleted");
        Ok(body)
    }

    #[instrument(skip(self, request), fields(index = %request.index, doc_type = %request.doc_type))]
    async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        let index = physical_index(&request.index, &request.doc_type);
        let body = build_search_body(request);

        debug!(index = %index, query = %body, "Executing search");

        let response = self
            .client
            .search(SearchParts::Index(&[&index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::read_json(response, SearchError::QueryError).await
    }

    #[instrument(skip(self, request), fields(index = %request.index, doc_type = %request.doc_type))]
    async fn count(&self, request: &CountRequest) -> Result<Value, SearchError> {
        let index = physical_index(&request.index, &request.doc_type);

        let response = self
            .client
            .count(CountParts::Index(&[&index]))
            .body(json!({ "query": { "match_all": {} } }))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::read_json(response, SearchError::CountError).await
    }

    async fn refresh(&self, index: &str, doc_type: &str) -> Result<(), SearchError> {
        let index = physical_index(index, doc_type);

        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[&index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Self::read_json(response, SearchError::RefreshError).await?;

        debug!(index = %index, "Index refreshed");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let health = Self::read_json(response, SearchError::ConnectionError).await?;
        let status = health
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");

        Ok(status == "green" || status == "yellow")
    }
}
