//! Synchronization of a model's records with search engine documents.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::context::SyncContext;
use crate::errors::SyncError;
use crate::model::ModelStore;
use crate::naming::doc_type_name;
use crate::projection::{document_id, project};
use crate::registry::OperationStatus;
use search_sync_repository::{SearchEngineClient, SearchError};
use search_sync_shared::{
    CountRequest, DeleteRequest, Document, IndexRequest, QueryType, SearchRecord, SearchRequest,
};

/// Overrides for a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Query clause; `match` when unset.
    pub query_type: Option<QueryType>,
    /// Maximum number of hits; the model's size limit when unset.
    pub size: Option<usize>,
}

impl SearchOptions {
    /// Use the given query clause.
    pub fn with_query_type(mut self, query_type: QueryType) -> Self {
        self.query_type = Some(query_type);
        self
    }

    /// Return at most `size` hits.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }
}

/// Outcome of an [`import`](SearchSync::import) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of records fetched from the store.
    pub total: usize,
    /// Records written to the index.
    pub succeeded: usize,
    /// Records whose write failed.
    pub failed: usize,
    /// Records skipped by the global flags.
    pub skipped: usize,
}

/// Keeps the records of one model in step with search engine documents.
///
/// Configuration (index, projected keys, size limit, last status) lives in
/// the shared [`SyncContext`] under the store's model name, so every
/// `SearchSync` built for the same model sees the same settings.
///
/// # Example
///
/// ```ignore
/// let sync = Arc::new(SearchSync::new(Arc::new(users_store), context.clone()));
/// sync.set_index("torm");
/// sync.after_initialize(&mut user_hooks);
///
/// let hits = sync.search("name", "john", SearchOptions::default()).await?;
/// ```
pub struct SearchSync<S: ModelStore> {
    store: Arc<S>,
    context: Arc<SyncContext>,
}

impl<S: ModelStore> SearchSync<S> {
    /// Attach search synchronization to the model behind `store`.
    pub fn new(store: Arc<S>, context: Arc<SyncContext>) -> Self {
        context.registry().ensure(store.model_name());
        Self { store, context }
    }

    /// The underlying model store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The shared synchronization context.
    pub fn context(&self) -> &Arc<SyncContext> {
        &self.context
    }

    /// Logical model name.
    pub fn model_name(&self) -> &str {
        self.store.model_name()
    }

    /// Set the index name. This is usually the application name.
    pub fn set_index(&self, name: impl Into<String>) {
        self.context.registry().set_index(self.model_name(), name);
    }

    /// Effective index name: the configured one, suffixed with `_test` in
    /// the test environment.
    pub fn index(&self) -> String {
        let configured = self.context.registry().index(self.model_name());
        self.context.environment().index_name(&configured)
    }

    /// Document type label, the model name decamelized and pluralized.
    pub fn doc_type(&self) -> String {
        doc_type_name(self.model_name())
    }

    /// Set the attributes projected into documents. `None` or an empty list
    /// projects every column.
    pub fn set_values(&self, keys: Option<Vec<String>>) {
        self.context.registry().set_keys(self.model_name(), keys);
    }

    /// Configured projected attributes; empty means every column.
    pub fn value_keys(&self) -> Vec<String> {
        self.context.registry().keys(self.model_name())
    }

    /// Document body for `record`.
    pub fn values(&self, record: &S::Record) -> Document {
        project(record, &self.value_keys())
    }

    /// Document identifier for `record`, its primary key as a string.
    pub fn id(&self, record: &S::Record) -> String {
        document_id(record, self.store.primary_key())
    }

    /// Set the default number of hits returned by a search.
    pub fn set_size_limit(&self, size_limit: usize) {
        self.context
            .registry()
            .set_size_limit(self.model_name(), size_limit);
    }

    /// Default number of hits returned by a search.
    pub fn size_limit(&self) -> usize {
        self.context.registry().size_limit(self.model_name())
    }

    /// Outcome of the last write or delete of this model.
    pub fn last_status(&self) -> Option<OperationStatus> {
        self.context.registry().last_status(self.model_name())
    }

    async fn client(&self) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        self.context.clients().client(self.model_name()).await
    }

    fn skips_writes(&self) -> bool {
        self.context
            .flags()
            .skips_writes(self.context.environment())
    }

    fn record(&self, result: &Result<Value, SearchError>) {
        self.context
            .registry()
            .record_status(self.model_name(), OperationStatus::from(result));
    }

    /// Create or replace the document of `record`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(response))` - The engine's response
    /// * `Ok(None)` - The write was skipped by the global flags
    /// * `Err(SearchError)` - The write failed; also kept as the last status
    #[instrument(skip(self, record), fields(model = %self.model_name()))]
    pub async fn update(&self, record: &S::Record) -> Result<Option<Value>, SearchError> {
        if self.skips_writes() {
            debug!("Write skipped by global flags");
            return Ok(None);
        }

        let request = IndexRequest {
            index: self.index(),
            doc_type: self.doc_type(),
            id: self.id(record),
            body: self.values(record),
        };

        let result = match self.client().await {
            Ok(client) => client.index(&request).await,
            Err(e) => Err(e),
        };
        self.record(&result);

        match &result {
            Ok(_) => debug!(id = %request.id, "Document indexed"),
            Err(e) => warn!(id = %request.id, error = %e, "Failed to index document"),
        }

        result.map(Some)
    }

    /// Delete the document of `record`. A missing document is not an error.
    ///
    /// Return values follow [`update`](Self::update).
    #[instrument(skip(self, record), fields(model = %self.model_name()))]
    pub async fn delete(&self, record: &S::Record) -> Result<Option<Value>, SearchError> {
        if self.skips_writes() {
            debug!("Delete skipped by global flags");
            return Ok(None);
        }

        let request = DeleteRequest {
            index: self.index(),
            doc_type: self.doc_type(),
            id: self.id(record),
        };

        let result = match self.client().await {
            Ok(client) => client.delete(&request).await,
            Err(e) => Err(e),
        };
        self.record(&result);

        match &result {
            Ok(_) => debug!(id = %request.id, "Document deleted"),
            Err(e) => warn!(id = %request.id, error = %e, "Failed to delete document"),
        }

        result.map(Some)
    }

    /// Search `attribute` for `value` and return the engine response as is.
    #[instrument(skip(self, value), fields(model = %self.model_name()))]
    pub async fn raw_search(
        &self,
        attribute: &str,
        value: impl Into<Value> + Send,
        options: SearchOptions,
    ) -> Result<Value, SearchError> {
        let request = SearchRequest {
            index: self.index(),
            doc_type: self.doc_type(),
            size: options.size.unwrap_or_else(|| self.size_limit()),
            query_type: options.query_type.unwrap_or_default(),
            attribute: attribute.to_string(),
            value: value.into(),
        };

        self.client().await?.search(&request).await
    }

    /// Search `attribute` for `value` and return the hits as records.
    ///
    /// Each record carries the primary key taken from the hit identifier and
    /// every other `_source` field unchanged, in the engine's ranking order.
    pub async fn search(
        &self,
        attribute: &str,
        value: impl Into<Value> + Send,
        options: SearchOptions,
    ) -> Result<Vec<SearchRecord>, SearchError> {
        let response = self.raw_search(attribute, value, options).await?;
        hits_to_records(&response, self.store.primary_key())
    }

    /// Number of documents of this model in the index.
    ///
    /// A missing index or a response without a numeric `count` gives 0.
    pub async fn count(&self) -> Result<u64, SearchError> {
        let request = CountRequest {
            index: self.index(),
            doc_type: self.doc_type(),
        };

        match self.client().await?.count(&request).await {
            Ok(response) => Ok(response.get("count").and_then(Value::as_u64).unwrap_or(0)),
            Err(e) if e.is_not_found() => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Make recent writes of this model visible to search.
    pub async fn refresh(&self) -> Result<(), SearchError> {
        self.client()
            .await?
            .refresh(&self.index(), &self.doc_type())
            .await
    }

    /// Write every persisted record of the model, one at a time.
    ///
    /// A failing record does not stop the run; the summary counts it.
    #[instrument(skip(self), fields(model = %self.model_name()))]
    pub async fn import(&self) -> Result<ImportSummary, SyncError> {
        let records = self.store.all().await?;
        let mut summary = ImportSummary {
            total: records.len(),
            ..Default::default()
        };

        for record in &records {
            match self.update(record).await {
                Ok(Some(_)) => summary.succeeded += 1,
                Ok(None) => summary.skipped += 1,
                Err(_) => summary.failed += 1,
            }
        }

        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Import completed"
        );

        Ok(summary)
    }
}

/// Flatten `hits.hits[]` of a search response into records.
fn hits_to_records(response: &Value, primary_key: &str) -> Result<Vec<SearchRecord>, SearchError> {
    let hits = response
        .get("hits")
        .and_then(|h| h.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::parse("search response has no hits.hits array"))?;

    hits.iter()
        .map(|hit| {
            let id = hit
                .get("_id")
                .and_then(Value::as_str)
                .ok_or_else(|| SearchError::parse("search hit has no _id"))?;

            let mut record = SearchRecord::new();
            record.insert(primary_key.to_string(), Value::String(id.to_string()));

            if let Some(source) = hit.get("_source").and_then(Value::as_object) {
                for (key, value) in source {
                    if key != primary_key {
                        record.insert(key.clone(), value.clone());
                    }
                }
            }

            Ok(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hits_to_records() {
        let response = json!({
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_id": "1", "_score": 2.0, "_source": { "id": 1, "name": "John Doe Jr.", "level": 1 } },
                    { "_id": "2", "_score": 1.0, "_source": { "name": "John Doe Father" } }
                ]
            }
        });

        let records = hits_to_records(&response, "id").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["id"], "1");
        assert_eq!(records[0]["name"], "John Doe Jr.");
        assert_eq!(records[0]["level"], 1);
        assert_eq!(records[0].keys().collect::<Vec<_>>(), vec!["id", "name", "level"]);
        assert_eq!(records[1]["id"], "2");
        assert_eq!(records[1]["name"], "John Doe Father");
    }

    #[test]
    fn test_hits_to_records_empty() {
        let response = json!({ "hits": { "hits": [] } });
        assert!(hits_to_records(&response, "id").unwrap().is_empty());
    }

    #[test]
    fn test_hits_to_records_malformed() {
        assert!(matches!(
            hits_to_records(&json!({}), "id"),
            Err(SearchError::ParseError(_))
        ));
        assert!(matches!(
            hits_to_records(&json!({ "hits": { "hits": [{ "_source": {} }] } }), "id"),
            Err(SearchError::ParseError(_))
        ));
    }

    #[test]
    fn test_hit_without_source_keeps_id() {
        let response = json!({ "hits": { "hits": [{ "_id": "abc" }] } });
        let records = hits_to_records(&response, "uuid").unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["uuid"], "abc");
    }

    #[test]
    fn test_search_options_builder() {
        let options = SearchOptions::default()
            .with_query_type(QueryType::MatchPhrase)
            .with_size(3);

        assert_eq!(options.query_type, Some(QueryType::MatchPhrase));
        assert_eq!(options.size, Some(3));
        assert_eq!(SearchOptions::default().query_type, None);
    }
}
