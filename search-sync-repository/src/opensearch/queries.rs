//! OpenSearch query builders.
//!
//! This module builds request bodies from the shared request structures.

use serde_json::{json, Map, Value};

use search_sync_shared::SearchRequest;

/// Build the body of a single-field search.
///
/// The result has the shape
/// `{"size": n, "query": {"<query_type>": {"<attribute>": <value>}}}`.
pub fn build_search_body(request: &SearchRequest) -> Value {
    let mut field = Map::new();
    field.insert(request.attribute.clone(), request.value.clone());

    let mut clause = Map::new();
    clause.insert(request.query_type.as_str().to_string(), Value::Object(field));

    json!({
        "size": request.size,
        "query": Value::Object(clause)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_sync_shared::QueryType;

    fn request(query_type: QueryType, value: Value) -> SearchRequest {
        SearchRequest {
            index: "torm".to_string(),
            doc_type: "elastic_users".to_string(),
            size: 10,
            query_type,
            attribute: "name".to_string(),
            value,
        }
    }

    #[test]
    fn test_match_query_shape() {
        let body = build_search_body(&request(QueryType::Match, json!("john doe")));

        assert_eq!(body["size"], 10);
        assert_eq!(body["query"]["match"]["name"], "john doe");
        assert_eq!(body["query"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_query_type_is_clause_key() {
        let body = build_search_body(&request(QueryType::Prefix, json!("jo")));

        assert_eq!(body["query"]["prefix"]["name"], "jo");
        assert!(body["query"].get("match").is_none());
    }
}
