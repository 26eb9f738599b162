//! Projection of model records into search documents.

use serde_json::Value;

use crate::model::Model;
use search_sync_shared::Document;

/// Build the document body for `record`.
///
/// With an empty `keys` list every column is projected. Attributes the record
/// does not have are projected as `null`.
pub fn project<M: Model + ?Sized>(record: &M, keys: &[String]) -> Document {
    let keys = if keys.is_empty() {
        record.columns()
    } else {
        keys.to_vec()
    };

    keys.into_iter()
        .map(|key| {
            let value = record.get(&key).unwrap_or(Value::Null);
            (key, value)
        })
        .collect()
}

/// Document identifier for `record`: its primary-key value as a string.
pub fn document_id<M: Model + ?Sized>(record: &M, primary_key: &str) -> String {
    record
        .get(primary_key)
        .map(|value| id_string(&value))
        .unwrap_or_default()
}

/// String form of an identifier value.
///
/// Strings are used verbatim, `null` becomes the empty string and every other
/// value uses its JSON rendering (`1`, `true`, `1.5`).
pub fn id_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
