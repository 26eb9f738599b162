//! Per-model search configuration.
//!
//! The registry maps a model name to its index name, projected keys, result
//! size limit and the outcome of its last write. Entries are created with
//! defaults on first access and live as long as the registry.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;

use search_sync_repository::SearchError;

/// Index name used until one is configured.
pub const DEFAULT_INDEX: &str = "TORM";

/// Result size limit used until one is configured.
pub const DEFAULT_SIZE_LIMIT: usize = 10;

/// Outcome of the last write or delete issued for a model.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus {
    /// The engine accepted the request; holds its response body.
    Succeeded(Value),
    /// The request failed.
    Failed(SearchError),
}

impl OperationStatus {
    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The engine response, if the operation succeeded.
    pub fn response(&self) -> Option<&Value> {
        match self {
            Self::Succeeded(response) => Some(response),
            Self::Failed(_) => None,
        }
    }

    /// The error, if the operation failed.
    pub fn error(&self) -> Option<&SearchError> {
        match self {
            Self::Succeeded(_) => None,
            Self::Failed(error) => Some(error),
        }
    }
}

impl From<&Result<Value, SearchError>> for OperationStatus {
    fn from(result: &Result<Value, SearchError>) -> Self {
        match result {
            Ok(response) => Self::Succeeded(response.clone()),
            Err(error) => Self::Failed(error.clone()),
        }
    }
}

/// Search configuration of a single model.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Configured index name, before any environment suffix.
    pub index: String,
    /// Attributes projected into the document; empty means all columns.
    pub keys: Vec<String>,
    /// Default number of hits returned by a search.
    pub size_limit: usize,
    /// Outcome of the last write or delete.
    pub last_status: Option<OperationStatus>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_INDEX.to_string(),
            keys: Vec::new(),
            size_limit: DEFAULT_SIZE_LIMIT,
            last_status: None,
        }
    }
}

/// Registry of per-model search configurations.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    defaults: SearchConfig,
    entries: RwLock<HashMap<String, SearchConfig>>,
}

impl ConfigRegistry {
    /// Create a registry using the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose new entries start from `defaults`.
    pub fn with_defaults(defaults: SearchConfig) -> Self {
        Self {
            defaults,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Make sure `model` has an entry. Returns whether it already existed.
    pub fn ensure(&self, model: &str) -> bool {
        if self.entries.read().contains_key(model) {
            return true;
        }

        let mut entries = self.entries.write();
        if entries.contains_key(model) {
            return true;
        }
        entries.insert(model.to_string(), self.defaults.clone());
        false
    }

    fn with_entry<R>(&self, model: &str, f: impl FnOnce(&mut SearchConfig) -> R) -> R {
        let mut entries = self.entries.write();
        let entry = entries
            .entry(model.to_string())
            .or_insert_with(|| self.defaults.clone());
        f(entry)
    }

    /// Snapshot of the configuration of `model`.
    pub fn get(&self, model: &str) -> SearchConfig {
        self.with_entry(model, |entry| entry.clone())
    }

    /// Set the index name of `model`.
    pub fn set_index(&self, model: &str, index: impl Into<String>) {
        let index = index.into();
        self.with_entry(model, |entry| entry.index = index);
    }

    /// Configured index name of `model`.
    pub fn index(&self, model: &str) -> String {
        self.with_entry(model, |entry| entry.index.clone())
    }

    /// Set the projected keys of `model`. `None` projects all columns.
    pub fn set_keys(&self, model: &str, keys: Option<Vec<String>>) {
        let keys = keys.unwrap_or_default();
        self.with_entry(model, |entry| entry.keys = keys);
    }

    /// Projected keys of `model`; empty means all columns.
    pub fn keys(&self, model: &str) -> Vec<String> {
        self.with_entry(model, |entry| entry.keys.clone())
    }

    /// Set the default search size of `model`.
    pub fn set_size_limit(&self, model: &str, size_limit: usize) {
        self.with_entry(model, |entry| entry.size_limit = size_limit);
    }

    /// Default search size of `model`.
    pub fn size_limit(&self, model: &str) -> usize {
        self.with_entry(model, |entry| entry.size_limit)
    }

    /// Record the outcome of a write or delete for `model`.
    pub fn record_status(&self, model: &str, status: OperationStatus) {
        self.with_entry(model, |entry| entry.last_status = Some(status));
    }

    /// Outcome of the last write or delete for `model`.
    pub fn last_status(&self, model: &str) -> Option<OperationStatus> {
        self.with_entry(model, |entry| entry.last_status.clone())
    }
}
