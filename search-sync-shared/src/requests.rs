//! Request structures handed to a search engine client.
//!
//! Each request names the logical `index` and the document `doc_type`; how a
//! backend lays those out physically is up to the backend.

use serde_json::Value;

use crate::document::Document;
use crate::query::QueryType;

/// Create or replace the document at `(index, doc_type, id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRequest {
    /// Logical index name.
    pub index: String,
    /// Document type label.
    pub doc_type: String,
    /// Document identifier, the record's primary key as a string.
    pub id: String,
    /// Projected attribute values.
    pub body: Document,
}

/// Remove the document at `(index, doc_type, id)`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    /// Logical index name.
    pub index: String,
    /// Document type label.
    pub doc_type: String,
    /// Document identifier.
    pub id: String,
}

/// Single-field search: `{"query": {query_type: {attribute: value}}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Logical index name.
    pub index: String,
    /// Document type label.
    pub doc_type: String,
    /// Maximum number of hits to return.
    pub size: usize,
    /// Clause used for the field query.
    pub query_type: QueryType,
    /// Attribute to query.
    pub attribute: String,
    /// Value to look for.
    pub value: Value,
}

/// Count the documents of `(index, doc_type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRequest {
    /// Logical index name.
    pub index: String,
    /// Document type label.
    pub doc_type: String,
}
