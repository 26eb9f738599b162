//! Document and search record types.

use serde_json::{Map, Value};

/// A flat projection of a model record, keyed by attribute name.
///
/// Key order follows insertion order, so a document built from an ordered
/// allow-list serializes in that order.
pub type Document = Map<String, Value>;

/// A search hit flattened back into record shape: the primary-key field is
/// filled from the hit identifier, every other field comes from `_source`.
pub type SearchRecord = Map<String, Value>;
