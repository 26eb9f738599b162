//! # Search Sync Shared
//!
//! Types shared between the model synchronization layer and the search
//! engine repository: documents, request structures and query types.

mod document;
mod query;
mod requests;

pub use document::{Document, SearchRecord};
pub use query::QueryType;
pub use requests::{CountRequest, DeleteRequest, IndexRequest, SearchRequest};
