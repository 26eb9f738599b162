//! Physical index naming.
//!
//! OpenSearch has no mapping types, so each `(index, doc_type)` pair lives in
//! its own physical index. Index names must be lowercase.

/// Separator between the logical index and the document type.
pub const TYPE_SEPARATOR: char = '-';

/// Physical index name for a logical index and document type.
///
/// `("TORM", "elastic_users")` becomes `"torm-elastic_users"`.
pub fn physical_index(index: &str, doc_type: &str) -> String {
    format!("{}{}{}", index, TYPE_SEPARATOR, doc_type).to_lowercase()
}
