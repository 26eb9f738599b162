//! A model store backed by a JSON array of objects.
//!
//! Each object is one record; its keys are the record's columns. This lets
//! any exported table be synchronized without the ORM that owns it.

use std::path::Path;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::SyncError;
use crate::model::{Model, ModelStore};

/// One record of a [`JsonRecordStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    fields: Map<String, Value>,
}

impl JsonRecord {
    /// Wrap a JSON object.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, SyncError> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(SyncError::store(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Set an attribute.
    pub fn set(&mut self, attribute: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(attribute.into(), value.into());
    }

    /// The record's fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Model for JsonRecord {
    fn columns(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn get(&self, attribute: &str) -> Option<Value> {
        self.fields.get(attribute).cloned()
    }
}

/// A fixed set of records standing in for a model's table.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    model_name: String,
    primary_key: String,
    records: Vec<JsonRecord>,
}

impl JsonRecordStore {
    /// Create a store with the given records.
    pub fn new(
        model_name: impl Into<String>,
        primary_key: impl Into<String>,
        records: Vec<JsonRecord>,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            primary_key: primary_key.into(),
            records,
        }
    }

    /// Create a store with no records.
    pub fn empty(model_name: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self::new(model_name, primary_key, Vec::new())
    }

    /// Build a store from a JSON array of objects.
    pub fn from_value(
        model_name: impl Into<String>,
        primary_key: impl Into<String>,
        value: Value,
    ) -> Result<Self, SyncError> {
        let items = match value {
            Value::Array(items) => items,
            _ => return Err(SyncError::store("expected a JSON array of records")),
        };

        let records = items
            .into_iter()
            .map(JsonRecord::from_value)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(model_name, primary_key, records))
    }

    /// Load a store from a file holding a JSON array of objects.
    pub async fn from_path(
        model_name: impl Into<String>,
        primary_key: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| SyncError::store(format!("{}: {}", path.display(), e)))?;

        let store = Self::from_value(model_name, primary_key, value)?;
        info!(path = %path.display(), records = store.records.len(), "Loaded records");
        Ok(store)
    }

    /// The store's records.
    pub fn records(&self) -> &[JsonRecord] {
        &self.records
    }
}

#[async_trait]
impl ModelStore for JsonRecordStore {
    type Record = JsonRecord;

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn primary_key(&self) -> &str {
        &self.primary_key
    }

    async fn all(&self) -> Result<Vec<JsonRecord>, SyncError> {
        Ok(self.records.clone())
    }
}
