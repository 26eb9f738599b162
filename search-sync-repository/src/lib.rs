//! # Search Sync Repository
//!
//! This crate provides the trait and implementations for talking to the
//! search engine on behalf of synchronized models. It includes definitions
//! for errors, the client interface, and a concrete implementation for
//! OpenSearch.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::ClientConfig;
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
