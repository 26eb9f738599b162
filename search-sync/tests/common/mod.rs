//! In-memory search engine used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use search_sync::{
    Environment, JsonRecord, JsonRecordStore, SearchSync, SharedClientFactory, SyncContext,
};
use search_sync_repository::{SearchEngineClient, SearchError};
use search_sync_shared::{
    CountRequest, DeleteRequest, Document, IndexRequest, QueryType, SearchRequest,
};

type Collection = Vec<(String, Document)>;

/// Search engine mock keeping documents per `(index, doc_type)`.
#[derive(Default)]
pub struct MemoryEngine {
    collections: Mutex<HashMap<(String, String), Collection>>,
    pub calls: AtomicUsize,
    pub failing: AtomicBool,
    pub failing_ids: Mutex<Vec<String>>,
    pub count_override: Mutex<Option<Value>>,
    pub last_index: Mutex<Option<IndexRequest>>,
    pub last_search: Mutex<Option<SearchRequest>>,
}

impl MemoryEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn documents(&self, index: &str, doc_type: &str) -> Collection {
        self.collections
            .lock()
            .await
            .get(&(index.to_string(), doc_type.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn enter(&self, kind: fn(String) -> SearchError) -> Result<(), SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(kind("engine unavailable".to_string()));
        }
        Ok(())
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn clause_matches(query_type: QueryType, field: &Value, value: &Value) -> Result<bool, SearchError> {
    match query_type {
        QueryType::Match => {
            let wanted = tokens(&value.as_str().map(str::to_string).unwrap_or_else(|| value.to_string()));
            let have = tokens(&field.as_str().map(str::to_string).unwrap_or_else(|| field.to_string()));
            Ok(wanted.iter().any(|t| have.contains(t)))
        }
        QueryType::Term => Ok(field == value),
        other => Err(SearchError::query(format!("{} is not supported", other))),
    }
}

#[async_trait]
impl SearchEngineClient for MemoryEngine {
    async fn index(&self, request: &IndexRequest) -> Result<Value, SearchError> {
        self.enter(SearchError::IndexError)?;
        if self.failing_ids.lock().await.contains(&request.id) {
            return Err(SearchError::index(format!("document {} rejected", request.id)));
        }
        *self.last_index.lock().await = Some(request.clone());

        let mut collections = self.collections.lock().await;
        let docs = collections
            .entry((request.index.clone(), request.doc_type.clone()))
            .or_default();

        let result = match docs.iter_mut().find(|(id, _)| *id == request.id) {
            Some(entry) => {
                entry.1 = request.body.clone();
                "updated"
            }
            None => {
                docs.push((request.id.clone(), request.body.clone()));
                "created"
            }
        };

        Ok(json!({ "_index": request.index, "_id": request.id, "result": result }))
    }

    async fn delete(&self, request: &DeleteRequest) -> Result<Value, SearchError> {
        self.enter(SearchError::DeleteError)?;

        let mut collections = self.collections.lock().await;
        let docs = collections
            .entry((request.index.clone(), request.doc_type.clone()))
            .or_default();

        let before = docs.len();
        docs.retain(|(id, _)| *id != request.id);
        let result = if docs.len() < before { "deleted" } else { "not_found" };

        Ok(json!({ "_index": request.index, "_id": request.id, "result": result }))
    }

    async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        self.enter(SearchError::QueryError)?;
        *self.last_search.lock().await = Some(request.clone());

        let docs = self.documents(&request.index, &request.doc_type).await;
        let mut hits = Vec::new();
        for (id, source) in docs {
            let field = source.get(&request.attribute).cloned().unwrap_or(Value::Null);
            if clause_matches(request.query_type, &field, &request.value)? {
                hits.push(json!({ "_id": id, "_score": 1.0, "_source": source }));
            }
        }
        hits.truncate(request.size);

        Ok(json!({ "hits": { "total": { "value": hits.len() }, "hits": hits } }))
    }

    async fn count(&self, request: &CountRequest) -> Result<Value, SearchError> {
        self.enter(SearchError::CountError)?;

        if let Some(response) = self.count_override.lock().await.clone() {
            return Ok(response);
        }

        let collections = self.collections.lock().await;
        match collections.get(&(request.index.clone(), request.doc_type.clone())) {
            Some(docs) => Ok(json!({ "count": docs.len() })),
            None => Err(SearchError::not_found(request.index.clone())),
        }
    }

    async fn refresh(&self, _index: &str, _doc_type: &str) -> Result<(), SearchError> {
        self.enter(SearchError::RefreshError)
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(!self.failing.load(Ordering::SeqCst))
    }
}

pub fn record(value: Value) -> JsonRecord {
    JsonRecord::from_value(value).expect("fixture must be an object")
}

pub fn john() -> JsonRecord {
    record(json!({
        "id": 1,
        "name": "John Doe Jr.",
        "email": "jr@doe.com",
        "user_level": 1,
        "code": "12345",
        "created_at": "2014-01-01 00:00:00",
        "updated_at": "2014-01-01 00:00:00"
    }))
}

pub fn father() -> JsonRecord {
    record(json!({
        "id": 2,
        "name": "John Doe Father",
        "email": "father@doe.com",
        "user_level": 1,
        "code": "54321",
        "created_at": "2014-01-01 00:00:00",
        "updated_at": "2014-01-01 00:00:00"
    }))
}

pub fn context(engine: &Arc<MemoryEngine>, environment: Environment) -> Arc<SyncContext> {
    let factory = Arc::new(SharedClientFactory::new(engine.clone()));
    Arc::new(SyncContext::new(environment, factory))
}

/// An `ElasticUser` model over `records`, indexed into `torm`.
pub fn users(
    engine: &Arc<MemoryEngine>,
    environment: Environment,
    records: Vec<JsonRecord>,
) -> Arc<SearchSync<JsonRecordStore>> {
    let store = Arc::new(JsonRecordStore::new("ElasticUser", "id", records));
    let sync = SearchSync::new(store, context(engine, environment));
    sync.set_index("torm");
    Arc::new(sync)
}
