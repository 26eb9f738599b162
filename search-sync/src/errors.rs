//! Error types for model search synchronization.

use search_sync_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while synchronizing models with the search engine.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The model store failed to load or decode records.
    #[error("Store error: {0}")]
    StoreError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SyncError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }
}
