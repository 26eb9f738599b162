//! The narrow view of the ORM a synchronized model needs.
//!
//! The ORM itself (connections, queries, migrations) lives elsewhere; it
//! only has to expose records through these two traits.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SyncError;

/// A persisted record of a model.
pub trait Model: Send + Sync {
    /// All column names of the record, in table order.
    fn columns(&self) -> Vec<String>;

    /// Current value of an attribute, or `None` if the record has no such
    /// attribute.
    fn get(&self, attribute: &str) -> Option<Value>;
}

/// Model-level access to the ORM: identity, primary key and full-table fetch.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Record type of this model.
    type Record: Model;

    /// Logical model name, e.g. `ElasticUser`. Keys the search configuration
    /// and derives the document type.
    fn model_name(&self) -> &str;

    /// Name of the primary-key attribute.
    fn primary_key(&self) -> &str;

    /// Every persisted record of the model.
    async fn all(&self) -> Result<Vec<Self::Record>, SyncError>;
}
